//! # Pool de Workers de Conexiones
//! src/server/pool.rs
//!
//! Implementa el paralelismo acotado del servidor: una cola FIFO
//! thread-safe de conexiones aceptadas y un número fijo de workers
//! dedicados que la drenan. El accept loop encola; cada worker atiende una
//! conexión completa (parseo, dispatch, respuesta) de forma bloqueante
//! antes de tomar la siguiente.

use crate::router::HandlerTable;
use crate::server::tcp::Server;
use std::collections::VecDeque;
use std::net::TcpStream;
use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

/// Estado interno de la cola, protegido por un único Mutex
struct QueueState {
    /// Conexiones esperando worker, en orden de llegada
    pending: VecDeque<TcpStream>,

    /// Una vez encendido no se acepta trabajo nuevo
    shutdown: bool,
}

/// Cola FIFO thread-safe de conexiones aceptadas
pub struct ConnectionQueue {
    state: Mutex<QueueState>,

    /// Condvar para despertar workers cuando llega trabajo o shutdown
    condvar: Condvar,
}

impl ConnectionQueue {
    /// Crea una cola vacía
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending: VecDeque::new(),
                shutdown: false,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Encola una conexión para que la atienda algún worker
    ///
    /// Retorna Err si el pool ya inició su shutdown; en ese caso la
    /// conexión se descarta y el socket se cierra al soltarse.
    pub fn enqueue(&self, stream: TcpStream) -> Result<(), String> {
        let mut state = self.state.lock().unwrap();

        if state.shutdown {
            return Err("Pool is shut down".to_string());
        }

        state.pending.push_back(stream);

        // Notificar a workers esperando
        self.condvar.notify_one();

        Ok(())
    }

    /// Desencola la siguiente conexión, bloqueando si no hay ninguna
    ///
    /// Retorna `None` solo cuando el shutdown fue señalado y la cola quedó
    /// vacía: lo que se encoló antes del shutdown todavía se atiende.
    pub fn dequeue(&self) -> Option<TcpStream> {
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(stream) = state.pending.pop_front() {
                return Some(stream);
            }

            if state.shutdown {
                return None;
            }

            // Esperar a que haya conexiones
            state = self.condvar.wait(state).unwrap();
        }
    }

    /// Señala el shutdown y despierta a todos los workers
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap();
        state.shutdown = true;
        self.condvar.notify_all();
    }

    /// Número de conexiones esperando worker
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConnectionQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool acotado de workers que atienden conexiones
pub struct WorkerPool {
    /// Cola compartida con todos los workers
    queue: Arc<ConnectionQueue>,

    /// Handles para esperar a los workers en el drop
    workers: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Crea el pool y lanza `size` workers dedicados
    pub fn new(size: usize, table: Arc<HandlerTable>, public_dir: PathBuf) -> Self {
        let queue = Arc::new(ConnectionQueue::new());
        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            let queue = Arc::clone(&queue);
            let table = Arc::clone(&table);
            let public_dir = public_dir.clone();

            workers.push(thread::spawn(move || {
                Self::worker_loop(id, queue, table, public_dir)
            }));
        }

        Self { queue, workers }
    }

    /// Loop principal del worker: drena la cola hasta el shutdown
    fn worker_loop(
        id: usize,
        queue: Arc<ConnectionQueue>,
        table: Arc<HandlerTable>,
        public_dir: PathBuf,
    ) {
        while let Some(stream) = queue.dequeue() {
            if let Err(e) = Server::resolve_connection(stream, &table, &public_dir) {
                // El error tumba esta conexión, no al worker
                eprintln!("   ❌ Worker {}: {}", id, e);
            }
        }
    }

    /// Entrega una conexión aceptada al pool
    ///
    /// Retorna Err si el shutdown ya fue señalado.
    pub fn execute(&self, stream: TcpStream) -> Result<(), String> {
        self.queue.enqueue(stream)
    }

    /// Inicia el shutdown: no entra trabajo nuevo, lo encolado se drena
    pub fn shutdown(&self) {
        self.queue.shutdown();
    }
}

impl Drop for WorkerPool {
    /// Señala el shutdown y espera a que los workers drenen la cola
    fn drop(&mut self) {
        self.queue.shutdown();

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{response, StatusCode};
    use std::io::{Read, Write};
    use std::net::{Shutdown, TcpListener};

    /// Par (cliente, lado servidor) de una conexión loopback real
    fn socket_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).unwrap();
        let (server_side, _) = listener.accept().unwrap();
        (client, server_side)
    }

    #[test]
    fn test_queue_is_fifo() {
        let queue = ConnectionQueue::new();

        let (client_a, server_a) = socket_pair();
        let (client_b, server_b) = socket_pair();

        queue.enqueue(server_a).unwrap();
        queue.enqueue(server_b).unwrap();
        assert_eq!(queue.len(), 2);

        let first = queue.dequeue().unwrap();
        assert_eq!(first.peer_addr().unwrap(), client_a.local_addr().unwrap());

        let second = queue.dequeue().unwrap();
        assert_eq!(second.peer_addr().unwrap(), client_b.local_addr().unwrap());

        assert!(queue.is_empty());
    }

    #[test]
    fn test_enqueue_after_shutdown_is_rejected() {
        let queue = ConnectionQueue::new();
        queue.shutdown();

        let (_client, server_side) = socket_pair();
        assert!(queue.enqueue(server_side).is_err());
    }

    #[test]
    fn test_dequeue_after_shutdown_drains_then_stops() {
        let queue = ConnectionQueue::new();

        let (_client, server_side) = socket_pair();
        queue.enqueue(server_side).unwrap();
        queue.shutdown();

        // Lo encolado antes del shutdown se entrega; después, None
        assert!(queue.dequeue().is_some());
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_pool_serves_queued_connection() {
        let mut table = HandlerTable::new();
        table.register(crate::http::Method::GET, "/ping", |_req, out| {
            response::write_empty(out, StatusCode::Ok)
        });

        let pool = WorkerPool::new(2, Arc::new(table), std::env::temp_dir());

        let (mut client, server_side) = socket_pair();
        client.write_all(b"GET /ping HTTP/1.1\r\n\r\n").unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        pool.execute(server_side).unwrap();

        let mut response_bytes = Vec::new();
        client.read_to_end(&mut response_bytes).unwrap();
        assert!(response_bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
    }

    #[test]
    fn test_drop_drains_pending_work() {
        let mut table = HandlerTable::new();
        table.register(crate::http::Method::GET, "/ping", |_req, out| {
            response::write_empty(out, StatusCode::Ok)
        });

        let pool = WorkerPool::new(1, Arc::new(table), std::env::temp_dir());

        let (mut client, server_side) = socket_pair();
        client.write_all(b"GET /ping HTTP/1.1\r\n\r\n").unwrap();
        client.shutdown(Shutdown::Write).unwrap();

        pool.execute(server_side).unwrap();
        drop(pool);

        // El drop señala shutdown pero deja drenar lo ya encolado
        let mut response_bytes = Vec::new();
        client.read_to_end(&mut response_bytes).unwrap();
        assert!(response_bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
    }
}
