//! # Tabla de Handlers
//! src/router/mod.rs
//!
//! Este módulo implementa la tabla que mapea pares (método, path exacto) a
//! handlers registrados.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → HandlerTable → Handler → bytes sobre el stream de salida
//! ```
//!
//! El matching es por string exacto, sensible a mayúsculas y sin normalizar
//! barras finales; solo se descarta el query string antes de buscar. La
//! tabla no decide qué pasa cuando no hay handler: una búsqueda sin
//! resultado cae al manejo por defecto del dispatcher (archivos estáticos
//! o 404).

use crate::http::{Method, Request};
use std::collections::HashMap;
use std::io::{self, Write};

/// Tipo de función handler
///
/// Un handler recibe el Request y el stream de salida, y es el único
/// responsable de escribir una respuesta bien formada (status line,
/// headers, body y flush). Va boxeado para que el cableado de rutas pueda
/// capturar estado, como el directorio de contenido estático.
pub type Handler = Box<dyn Fn(&Request, &mut dyn Write) -> io::Result<()> + Send + Sync>;

/// Tabla de handlers indexada por método y path exacto
pub struct HandlerTable {
    /// método → (path → handler)
    routes: HashMap<Method, HashMap<String, Handler>>,
}

impl HandlerTable {
    /// Crea una tabla vacía
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registra un handler para un par (método, path)
    ///
    /// Registrar dos veces el mismo par reemplaza el handler anterior.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::router::HandlerTable;
    /// use web_server::http::{response, Method, StatusCode};
    ///
    /// let mut table = HandlerTable::new();
    /// table.register(Method::GET, "/messages", |_req, out| {
    ///     response::write_empty(out, StatusCode::NotFound)
    /// });
    ///
    /// assert!(table.find(Method::GET, "/messages?last=10").is_some());
    /// ```
    pub fn register<F>(&mut self, method: Method, path: &str, handler: F)
    where
        F: Fn(&Request, &mut dyn Write) -> io::Result<()> + Send + Sync + 'static,
    {
        self.routes
            .entry(method)
            .or_default()
            .insert(path.to_string(), Box::new(handler));
    }

    /// Indica si el método tiene al menos un handler registrado
    ///
    /// El dispatcher responde 400 a cualquier método sin registros, antes
    /// de mirar el path.
    pub fn contains_method(&self, method: Method) -> bool {
        self.routes.contains_key(&method)
    }

    /// Busca el handler para un par (método, path)
    ///
    /// El query string del path se descarta antes de comparar; el resto es
    /// match exacto.
    pub fn find(&self, method: Method, path: &str) -> Option<&Handler> {
        let path = strip_query(path);
        self.routes.get(&method)?.get(path)
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Descarta el sufijo de query string: todo desde el primer `?`
pub fn strip_query(path: &str) -> &str {
    match path.find('?') {
        Some(pos) => &path[..pos],
        None => path,
    }
}
