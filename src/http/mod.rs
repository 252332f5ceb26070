//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que habla el servidor,
//! desde cero y sin librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (request line, headers crudos, query parameters)
//! - Escritura de responses con framing fijo
//! - Manejo de status codes
//!
//! ## Subconjunto soportado
//!
//! - Entrada: request line + headers opcionales; el body se ignora
//! - Salida: siempre `Connection: close` y `Content-Length` exacto
//! - Sin keep-alive, sin chunked transfer encoding
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! Another-Header: Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <h1>hola</h1>
//! ```

// Submódulos del módulo HTTP

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Escritura de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{Method, ParseError, Request, MAX_REQUEST_BYTES};
pub use status::StatusCode;
