//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes y las encola
//! 3. Atiende cada conexión en un worker del pool
//! 4. Lee y parsea el request, despacha y escribe el response
//!
//! Cada conexión recibe una sola respuesta y se cierra (Connection: close).

pub mod pool;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use pool::{ConnectionQueue, WorkerPool};
pub use tcp::Server;
