//! # Contenido Estático
//! src/files.rs
//!
//! Sirve archivos del directorio público a partir de un allow-list fijo de
//! paths relativos. El dispatcher recurre a este módulo cuando ningún
//! handler registrado coincide pero el path sí está en la lista.
//!
//! Un archivo (`/classic.html`) se trata como plantilla: cada aparición
//! del token literal `{time}` se sustituye por la hora local antes de
//! medir el `Content-Length`.

use crate::http::{response, StatusCode};
use chrono::Local;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Paths estáticos que el servidor acepta servir
///
/// El conjunto es fijo: no se amplía en runtime, y nada fuera de él se
/// sirve aunque el archivo exista bajo el directorio público.
pub const VALID_PATHS: [&str; 11] = [
    "/index.html",
    "/spring.svg",
    "/spring.png",
    "/resources.html",
    "/styles.css",
    "/app.js",
    "/links.html",
    "/forms.html",
    "/classic.html",
    "/events.html",
    "/events.js",
];

/// Path que se renderiza como plantilla
const TEMPLATE_PATH: &str = "/classic.html";

/// Token literal que la plantilla sustituye por la hora actual
const TIME_TOKEN: &str = "{time}";

/// Indica si un path pertenece al allow-list estático
pub fn is_valid_path(path: &str) -> bool {
    VALID_PATHS.contains(&path)
}

/// Sirve un archivo del directorio público sobre el stream de salida
///
/// Escribe `200 OK` con `Content-Type` (sondeado por extensión),
/// `Content-Length` y `Connection: close`, seguido de los bytes del
/// archivo, y hace flush. Para la plantilla el contenido se carga como
/// texto y se sustituye antes de medir la longitud; el resto de archivos
/// se copian en streaming sin cargarlos enteros en memoria.
///
/// Un fallo de I/O (archivo inexistente incluido) se propaga tal cual: es
/// fatal para la conexión y no se degrada a un 404.
pub fn serve(out: &mut dyn Write, path: &str, public_dir: &Path) -> io::Result<()> {
    let file_path = public_dir.join(path.trim_start_matches('/'));
    let mime_type = mime_guess::from_path(&file_path).first_or_octet_stream();

    // El Content-Length de la plantilla refleja el contenido ya
    // sustituido, no el tamaño en disco
    if path == TEMPLATE_PATH {
        let template = fs::read_to_string(&file_path)?;
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
        let content = template.replace(TIME_TOKEN, &timestamp);

        response::write_head(out, StatusCode::Ok, mime_type.as_ref(), content.len() as u64)?;
        out.write_all(content.as_bytes())?;
        return out.flush();
    }

    let length = fs::metadata(&file_path)?.len();
    response::write_head(out, StatusCode::Ok, mime_type.as_ref(), length)?;

    let mut file = File::open(&file_path)?;
    io::copy(&mut file, out)?;
    out.flush()
}
