//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que atiende múltiples conexiones
//! simultáneas con un pool acotado de workers. El accept loop solo encola;
//! el parseo, el dispatch y la escritura de la respuesta ocurren completos
//! en el worker que tomó la conexión.

use crate::config::Config;
use crate::files;
use crate::http::{response, Method, Request, StatusCode, MAX_REQUEST_BYTES};
use crate::router::{self, HandlerTable};
use crate::server::pool::WorkerPool;
use std::io::{BufWriter, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Servidor HTTP/1.1 concurrente sobre un pool acotado de workers
pub struct Server {
    config: Config,
    table: HandlerTable,
}

impl Server {
    /// Crea un servidor con la tabla de rutas vacía
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: HandlerTable::new(),
        }
    }

    /// Registra un handler para un método y path exactos
    ///
    /// Registrar dos veces el mismo par (método, path) reemplaza el
    /// handler anterior. Todo registro ocurre antes de `listen`.
    pub fn register<F>(&mut self, method: Method, path: &str, handler: F)
    where
        F: Fn(&Request, &mut dyn Write) -> std::io::Result<()> + Send + Sync + 'static,
    {
        self.table.register(method, path, handler);
    }

    /// Corre el accept loop hasta que el socket de escucha falle
    ///
    /// Consume el servidor: la tabla de rutas pasa a ser compartida e
    /// inmutable entre los workers. Un error del socket de escucha es
    /// fatal; se señala el shutdown del pool y se propaga el error.
    pub fn listen(self) -> std::io::Result<()> {
        let address = self.config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", address);
        println!("[*] Pool de {} workers\n", self.config.workers);

        let table = Arc::new(self.table);
        let public_dir = PathBuf::from(&self.config.public_dir);
        let pool = WorkerPool::new(self.config.workers, table, public_dir);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(e) = pool.execute(stream) {
                        eprintln!("   ❌ Conexión rechazada: {}", e);
                    }
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                    pool.shutdown();
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Atiende una conexión completa: una lectura, una respuesta, cerrar
    ///
    /// La petición debe llegar completa en la primera lectura (hasta
    /// `MAX_REQUEST_BYTES`); no hay re-lecturas. Si el peer cierra sin
    /// enviar nada la conexión se cierra en silencio, sin respuesta.
    pub(crate) fn resolve_connection(
        mut socket: TcpStream,
        table: &HandlerTable,
        public_dir: &Path,
    ) -> std::io::Result<()> {
        let mut buffer = [0u8; MAX_REQUEST_BYTES];
        let bytes_read = socket.read(&mut buffer)?;

        if bytes_read == 0 {
            return Ok(());
        }

        let mut out = BufWriter::new(socket);

        let request = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => request,
            Err(e) => {
                println!("   ❌ Parse error: {}", e);
                return response::write_empty(&mut out, StatusCode::BadRequest);
            }
        };

        // Un método sin ningún handler registrado no se atiende, ni
        // siquiera con archivos estáticos
        if !table.contains_method(request.method()) {
            return response::write_empty(&mut out, StatusCode::BadRequest);
        }

        println!("   ✅ {} {}", request.method().as_str(), request.path());

        let path = router::strip_query(request.path());

        if let Some(handler) = table.find(request.method(), path) {
            return handler(&request, &mut out);
        }

        if files::is_valid_path(path) {
            return files::serve(&mut out, path, public_dir);
        }

        response::write_empty(&mut out, StatusCode::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::net::Shutdown;
    use std::thread;

    /// Atiende una conexión en un listener efímero y retorna los bytes
    /// que recibió el cliente tras enviar `request_bytes`
    fn roundtrip(table: HandlerTable, public_dir: PathBuf, request_bytes: &[u8]) -> Vec<u8> {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let table = Arc::new(table);

        let server = thread::spawn({
            let table = Arc::clone(&table);
            move || {
                let (stream, _) = listener.accept().unwrap();
                Server::resolve_connection(stream, &table, &public_dir).unwrap();
            }
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(request_bytes).unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        let mut received = Vec::new();
        client.read_to_end(&mut received).unwrap();

        server.join().unwrap();
        received
    }

    /// Tabla con un GET /messages que responde 404 vacío
    fn table_with_get() -> HandlerTable {
        let mut table = HandlerTable::new();
        table.register(Method::GET, "/messages", |_req, out| {
            response::write_empty(out, StatusCode::NotFound)
        });
        table
    }

    /// Directorio público de prueba con un styles.css de 20 bytes
    fn fixture_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("web_server_tcp_{}_{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("styles.css"), "body { color: red; }").unwrap();
        dir
    }

    #[test]
    fn test_unknown_path_gets_exact_404() {
        let received = roundtrip(
            table_with_get(),
            std::env::temp_dir(),
            b"GET /unknown HTTP/1.1\r\nHost: localhost\r\n\r\n",
        );

        let expected = b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
        assert_eq!(received, expected.to_vec());
    }

    #[test]
    fn test_handler_writes_the_whole_response() {
        let mut table = HandlerTable::new();
        table.register(Method::POST, "/messages", |_req, out| {
            response::write_empty(out, StatusCode::ServiceUnavailable)
        });

        let received = roundtrip(
            table,
            std::env::temp_dir(),
            b"POST /messages HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\n\r\n",
        );

        let expected =
            b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
        assert_eq!(received, expected.to_vec());
    }

    #[test]
    fn test_malformed_request_line_gets_400() {
        let received = roundtrip(HandlerTable::new(), std::env::temp_dir(), b"BADLINE\r\n\r\n");

        let expected = b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
        assert_eq!(received, expected.to_vec());
    }

    #[test]
    fn test_method_without_registrations_gets_400() {
        // DELETE no tiene handlers: ni siquiera un path permitido se sirve
        let received = roundtrip(
            table_with_get(),
            std::env::temp_dir(),
            b"DELETE /index.html HTTP/1.1\r\n\r\n",
        );

        let expected = b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
        assert_eq!(received, expected.to_vec());
    }

    #[test]
    fn test_query_string_is_stripped_for_dispatch() {
        let mut table = HandlerTable::new();
        table.register(Method::GET, "/messages", |_req, out| {
            response::write_empty(out, StatusCode::Ok)
        });

        let received = roundtrip(
            table,
            std::env::temp_dir(),
            b"GET /messages?last=10&user=ana HTTP/1.1\r\n\r\n",
        );

        let expected = b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
        assert_eq!(received, expected.to_vec());
    }

    #[test]
    fn test_static_fallback_serves_allowed_file() {
        let dir = fixture_dir("static");

        let received = roundtrip(table_with_get(), dir, b"GET /styles.css HTTP/1.1\r\n\r\n");

        let expected = b"HTTP/1.1 200 OK\r\nContent-Type: text/css\r\nContent-Length: 20\r\nConnection: close\r\n\r\nbody { color: red; }";
        assert_eq!(received, expected.to_vec());
    }

    #[test]
    fn test_static_fallback_ignores_query_suffix() {
        let dir = fixture_dir("static_query");

        let received = roundtrip(table_with_get(), dir, b"GET /styles.css?v=2 HTTP/1.1\r\n\r\n");

        assert!(received.starts_with(b"HTTP/1.1 200 OK\r\nContent-Type: text/css\r\n"));
        assert!(received.ends_with(b"body { color: red; }"));
    }

    #[test]
    fn test_any_registered_method_reaches_static_fallback() {
        let dir = fixture_dir("post_static");

        let mut table = HandlerTable::new();
        table.register(Method::POST, "/messages", |_req, out| {
            response::write_empty(out, StatusCode::ServiceUnavailable)
        });

        // POST tiene handlers, /styles.css no es uno de ellos: cae al
        // responder de archivos igual que un GET
        let received = roundtrip(table, dir, b"POST /styles.css HTTP/1.1\r\n\r\n");

        assert!(received.starts_with(b"HTTP/1.1 200 OK\r\n"));
        assert!(received.ends_with(b"body { color: red; }"));
    }

    #[test]
    fn test_empty_connection_gets_no_response() {
        let received = roundtrip(HandlerTable::new(), std::env::temp_dir(), b"");
        assert!(received.is_empty());
    }
}
