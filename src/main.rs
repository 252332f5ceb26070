//! # Web Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.
//!
//! Arma la configuración desde CLI/env, registra los handlers de la
//! aplicación y arranca el accept loop.

use std::path::PathBuf;

use web_server::config::Config;
use web_server::files;
use web_server::http::{response, Method, StatusCode};
use web_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Web Server HTTP/1.1");
    println!("=================================\n");

    // Crear configuración (CLI o desde env)
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("❌ Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    let public_dir = PathBuf::from(&config.public_dir);

    let mut server = Server::new(config);

    // Los mensajes todavía no existen: GET responde 404 y POST 503
    server.register(Method::GET, "/messages", |_req, out| {
        response::write_empty(out, StatusCode::NotFound)
    });

    server.register(Method::POST, "/messages", |_req, out| {
        response::write_empty(out, StatusCode::ServiceUnavailable)
    });

    // La raíz sirve el index como cualquier otro archivo estático
    server.register(Method::GET, "/", move |_req, out| {
        files::serve(out, "/index.html", &public_dir)
    });

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.listen() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
