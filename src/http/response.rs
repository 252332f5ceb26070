//! # Escritura de Respuestas HTTP
//! src/http/response.rs
//!
//! Este módulo escribe respuestas HTTP/1.1 directamente sobre el stream de
//! salida, con un framing fijo: el orden de los headers es parte del
//! contrato con el cliente, así que no se pasa por ninguna estructura
//! intermedia que lo pueda reordenar.
//!
//! ## Formato de una respuesta sin body
//!
//! ```text
//! HTTP/1.1 404 Not Found\r\n
//! Content-Length: 0\r\n
//! Connection: close\r\n
//! \r\n
//! ```
//!
//! ## Formato de una respuesta con contenido
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <h1>hola</h1>
//! ```
//!
//! Toda respuesta lleva `Connection: close` y un `Content-Length` exacto:
//! el servidor no mantiene conexiones vivas.

use super::StatusCode;
use std::io::{self, Write};

/// Escribe una respuesta completa sin body y hace flush
///
/// Es la respuesta terminal para los códigos que el dispatcher genera por
/// su cuenta (400, 404) y la que usan los handlers que solo responden un
/// estado.
///
/// # Ejemplo
/// ```
/// use web_server::http::{response, StatusCode};
///
/// let mut out = Vec::new();
/// response::write_empty(&mut out, StatusCode::NotFound).unwrap();
///
/// assert_eq!(
///     out,
///     b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
/// );
/// ```
pub fn write_empty(out: &mut dyn Write, status: StatusCode) -> io::Result<()> {
    write!(
        out,
        "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        status
    )?;
    out.flush()
}

/// Escribe la cabecera de una respuesta con contenido, sin el body
///
/// Genera, en este orden:
/// - Status line: `HTTP/1.1 200 OK\r\n`
/// - `Content-Type`, `Content-Length`, `Connection: close`
/// - Línea vacía que separa headers del body
///
/// El caller escribe el body a continuación y es responsable del flush
/// final.
pub fn write_head(
    out: &mut dyn Write,
    status: StatusCode,
    content_type: &str,
    content_length: u64,
) -> io::Result<()> {
    write!(
        out,
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status, content_type, content_length
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_empty_404_exact_bytes() {
        let mut out = Vec::new();
        write_empty(&mut out, StatusCode::NotFound).unwrap();

        assert_eq!(
            out,
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn test_write_empty_503_status_line() {
        let mut out = Vec::new();
        write_empty(&mut out, StatusCode::ServiceUnavailable).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 503 Service Unavailable\r\n"));
        assert!(text.contains("Content-Length: 0\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_write_head_exact_bytes() {
        let mut out = Vec::new();
        write_head(&mut out, StatusCode::Ok, "text/html", 13).unwrap();

        assert_eq!(
            out,
            b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 13\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn test_write_head_then_body() {
        let mut out = Vec::new();
        write_head(&mut out, StatusCode::Ok, "text/plain", 4).unwrap();
        out.extend_from_slice(b"Test");

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("\r\n\r\nTest"));
    }
}
