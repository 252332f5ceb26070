//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero, operando
//! directamente sobre el buffer de bytes leído de la conexión.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! GET /path?param1=value1&param2=value2 HTTP/1.1\r\n
//! Host: localhost:9999\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ## Estrategia
//!
//! Se hace una única lectura acotada ([`MAX_REQUEST_BYTES`]) y se trabaja
//! con índices sobre ese buffer: primero se localiza el `\r\n` que cierra la
//! request line, después el `\r\n\r\n` que cierra el bloque de headers. Los
//! headers se conservan como líneas crudas, sin separar nombre y valor; los
//! query parameters sí se extraen del path, en el orden del wire. Cualquier
//! byte posterior al terminador de headers (un body) se ignora.

/// Máximo de bytes que se leen de una conexión para parsear la petición.
///
/// La lectura es única: si el terminador de headers no aparece dentro de
/// esta ventana, el parseo falla. No hay bucle de acumulación.
pub const MAX_REQUEST_BYTES: usize = 4096;

/// Métodos HTTP reconocidos
///
/// La enumeración es cerrada y la búsqueda por nombre es total: un nombre
/// desconocido produce [`Method::Unrecognized`], un valor distinguible que
/// todavía se puede registrar en los logs, no un error ni una ausencia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,

    /// POST - Enviar datos a un recurso
    POST,

    /// PUT - Reemplazar un recurso
    PUT,

    /// DELETE - Eliminar un recurso
    DELETE,

    /// CONNECT - Establecer un túnel
    CONNECT,

    /// OPTIONS - Consultar capacidades
    OPTIONS,

    /// TRACE - Eco de diagnóstico
    TRACE,

    /// PATCH - Modificación parcial de un recurso
    PATCH,

    /// Centinela para nombres que no corresponden a ningún verbo conocido
    Unrecognized,
}

impl Method {
    /// Busca un método por su nombre exacto (sensible a mayúsculas)
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Method;
    ///
    /// assert_eq!(Method::from_name("GET"), Method::GET);
    /// assert_eq!(Method::from_name("get"), Method::Unrecognized);
    /// ```
    pub fn from_name(s: &str) -> Method {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "CONNECT" => Method::CONNECT,
            "OPTIONS" => Method::OPTIONS,
            "TRACE" => Method::TRACE,
            "PATCH" => Method::PATCH,
            _ => Method::Unrecognized,
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::CONNECT => "CONNECT",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::PATCH => "PATCH",
            Method::Unrecognized => "UNRECOGNIZED",
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No apareció el `\r\n` de la request line dentro de lo leído
    IncompleteRequestLine,

    /// Formato inválido de la request line (tokens distintos de 3, o bytes
    /// que no son UTF-8)
    InvalidRequestLine,

    /// El token de método no corresponde a ningún verbo conocido
    UnrecognizedMethod(String),

    /// No apareció el `\r\n\r\n` que cierra los headers dentro de lo leído
    MissingHeadersTerminator,

    /// El bloque de headers contiene bytes que no son UTF-8
    InvalidHeaderBlock,

    /// El path no es una URI sintácticamente válida
    InvalidPath(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncompleteRequestLine => write!(f, "Incomplete request line"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnrecognizedMethod(m) => write!(f, "Unrecognized HTTP method: {}", m),
            ParseError::MissingHeadersTerminator => write!(f, "Headers terminator not found"),
            ParseError::InvalidHeaderBlock => write!(f, "Invalid header block"),
            ParseError::InvalidPath(p) => write!(f, "Invalid request path: {}", p),
        }
    }
}

impl std::error::Error for ParseError {}

/// Representa un request HTTP/1.1 parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP ya resuelto (nunca es `Unrecognized`)
    method: Method,

    /// Path tal como vino en la request line, query string incluido
    /// (ej: "/messages?last=10")
    path: String,

    /// Headers como líneas crudas, en orden de llegada
    /// (ej: \["Host: localhost:9999", "User-Agent: curl"\])
    headers: Vec<String>,

    /// Query parameters en orden de llegada, con duplicados preservados
    query_params: Vec<(String, String)>,
}

impl Request {
    /// Parsea un request HTTP/1.1 desde los bytes leídos de la conexión
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Los bytes efectivamente leídos (como máximo
    ///   [`MAX_REQUEST_BYTES`])
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - Error durante el parsing
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use web_server::http::{Method, Request};
    ///
    /// let raw = b"GET /messages?user=ana HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.path(), "/messages?user=ana");
    /// assert_eq!(request.query_param("user"), Some("ana"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        // 1. Localizar el fin de la request line
        let line_end =
            index_of(buffer, b"\r\n", 0).ok_or(ParseError::IncompleteRequestLine)?;

        let request_line = std::str::from_utf8(&buffer[..line_end])
            .map_err(|_| ParseError::InvalidRequestLine)?;

        // 2. Separar por espacios simples: METHOD PATH VERSION, exactamente
        //    3 tokens (un espacio doble produce un token vacío y falla)
        let tokens: Vec<&str> = request_line.split(' ').collect();
        if tokens.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        // 3. Resolver el método; con el centinela no se construye Request
        let method = Method::from_name(tokens[0]);
        if method == Method::Unrecognized {
            return Err(ParseError::UnrecognizedMethod(tokens[0].to_string()));
        }

        // 4. Localizar el terminador del bloque de headers. El escaneo
        //    arranca sobre el CRLF de la request line: con cero headers el
        //    terminador se solapa con ese CRLF.
        let headers_start = line_end + 2;
        let headers_end =
            index_of(buffer, b"\r\n\r\n", line_end).ok_or(ParseError::MissingHeadersTerminator)?;

        // 5. El bloque de headers queda como líneas crudas en orden
        let headers = if headers_end <= headers_start {
            Vec::new()
        } else {
            let block = std::str::from_utf8(&buffer[headers_start..headers_end])
                .map_err(|_| ParseError::InvalidHeaderBlock)?;
            block.split("\r\n").map(str::to_string).collect()
        };

        // 6. Validar el path como URI y extraer los query parameters
        let path = tokens[1];
        Self::validate_path(path)?;
        let query_params = Self::parse_query_string(path);

        Ok(Request {
            method,
            path: path.to_string(),
            headers,
            query_params,
        })
    }

    /// Valida que el path sea una URI sintácticamente aceptable
    ///
    /// Se admite el repertorio de caracteres de URI (no reservados,
    /// sub-delimitadores y delimitadores de componente) más escapes `%XX`
    /// bien formados. Un path vacío no direcciona ningún recurso y falla.
    fn validate_path(path: &str) -> Result<(), ParseError> {
        if path.is_empty() {
            return Err(ParseError::InvalidPath(String::new()));
        }

        let bytes = path.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'%' => {
                    let escaped = i + 2 < bytes.len()
                        && bytes[i + 1].is_ascii_hexdigit()
                        && bytes[i + 2].is_ascii_hexdigit();
                    if !escaped {
                        return Err(ParseError::InvalidPath(path.to_string()));
                    }
                    i += 3;
                }
                b if is_uri_byte(b) => i += 1,
                _ => return Err(ParseError::InvalidPath(path.to_string())),
            }
        }

        Ok(())
    }

    /// Extrae los query parameters del path, ya validado
    ///
    /// El query es lo que está entre el primer `?` y un `#` (o el final).
    /// Cada par se separa por `&`; nombre y valor por el primer `=`. Un
    /// parámetro sin `=` queda con valor vacío.
    fn parse_query_string(path: &str) -> Vec<(String, String)> {
        let query = match path.find('?') {
            Some(pos) => &path[pos + 1..],
            None => return Vec::new(),
        };

        // El fragmento no forma parte del query
        let query = match query.find('#') {
            Some(pos) => &query[..pos],
            None => query,
        };

        let mut params = Vec::new();
        for param in query.split('&') {
            if param.is_empty() {
                continue;
            }

            match param.find('=') {
                Some(eq_pos) => {
                    let name = Self::percent_decode(&param[..eq_pos]);
                    let value = Self::percent_decode(&param[eq_pos + 1..]);
                    params.push((name, value));
                }
                None => {
                    // Parámetro sin valor (ej: "?debug")
                    params.push((Self::percent_decode(param), String::new()));
                }
            }
        }

        params
    }

    /// Decodifica escapes `%XX` y el `+` de formularios como espacio
    ///
    /// Secuencias decodificadas que no sean UTF-8 válido se reemplazan, no
    /// abortan el parseo.
    fn percent_decode(s: &str) -> String {
        let bytes = s.as_bytes();
        let mut decoded = Vec::with_capacity(bytes.len());
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'%' if i + 2 < bytes.len() => {
                    match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                        (Some(hi), Some(lo)) => {
                            decoded.push(hi << 4 | lo);
                            i += 3;
                        }
                        // Escape malformado: se copia literal
                        _ => {
                            decoded.push(b'%');
                            i += 1;
                        }
                    }
                }
                b'+' => {
                    decoded.push(b' ');
                    i += 1;
                }
                b => {
                    decoded.push(b);
                    i += 1;
                }
            }
        }

        String::from_utf8_lossy(&decoded).into_owned()
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path crudo del request, query string incluido
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene los headers como líneas crudas, en orden de llegada
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Obtiene todos los query parameters en orden de llegada
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query_params
    }

    /// Busca un query parameter por nombre, sin distinguir mayúsculas
    ///
    /// Con nombres repetidos gana la primera aparición en el wire.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::http::Request;
    ///
    /// let raw = b"GET /test?Num=42 HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.query_param("num"), Some("42"));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(param_name, _)| param_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Busca la primera ocurrencia de `needle` en `haystack` desde `start`
///
/// Escaneo izquierda a derecha; ante varias ocurrencias gana la primera.
fn index_of(haystack: &[u8], needle: &[u8], start: usize) -> Option<usize> {
    if needle.is_empty() || start >= haystack.len() || haystack.len() - start < needle.len() {
        return None;
    }

    haystack[start..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| start + pos)
}

/// Bytes admitidos en una URI sin escapar
fn is_uri_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            // No reservados
            b'-' | b'.' | b'_' | b'~'
            // Sub-delimitadores
            | b'!' | b'$' | b'&' | b'\'' | b'(' | b')'
            | b'*' | b'+' | b',' | b';' | b'='
            // Delimitadores de componente
            | b':' | b'/' | b'?' | b'#' | b'@'
        )
}

/// Valor numérico de un dígito hexadecimal
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
