//! # Web Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 minimalista y concurrente: atiende un subconjunto
//! estricto del protocolo (una petición por conexión, Connection: close)
//! con un pool acotado de workers y sin re-lecturas del socket.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing del request y framing byte-exacto del response
//! - `router`: Tabla de handlers por (método, path exacto)
//! - `files`: Responder de archivos estáticos con lista de paths permitidos
//! - `server`: Accept loop, pool de workers y resolución de conexiones
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use web_server::config::Config;
//! use web_server::http::{response, Method, StatusCode};
//! use web_server::server::Server;
//!
//! let mut server = Server::new(Config::default());
//!
//! server.register(Method::GET, "/health", |_req, out| {
//!     response::write_empty(out, StatusCode::Ok)
//! });
//!
//! server.listen().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
