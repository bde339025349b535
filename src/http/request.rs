//! # Parsing de Requests HTTP/1.x
//! src/http/request.rs
//!
//! Parser HTTP escrito a mano, sin librerías de alto nivel.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /hello-world HTTP/1.1\r\n
//! Host: localhost:12345\r\n
//! Content-Type: application/x-www-form-urlencoded\r\n
//! Content-Length: 10\r\n
//! \r\n
//! name=Alice
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path?query HTTP/1.x` (exactamente 3 tokens)
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: todo lo que sigue a la línea vacía (opcional)

use super::MediaType;
use std::collections::HashMap;
use thiserror::Error;

/// Separador entre headers y body
pub const HEADER_TERMINATOR: &str = "\r\n\r\n";

/// Método HTTP del request
///
/// Solo GET y POST tienen rutas; el resto se conserva tal cual para
/// poder responder 501 con el nombre del método.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    Get,

    /// POST - Enviar datos (formulario de `/hello-world`)
    Post,

    /// Cualquier otro token (PUT, DELETE, HEAD, ...)
    Other(String),
}

impl Method {
    /// Interpreta el primer token de la request line
    ///
    /// Nunca falla: los métodos desconocidos se guardan en `Other`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
///
/// Todos se responden al cliente como `400 Bad Request`; `reason()`
/// da el texto que va en el body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request sin ningún byte
    #[error("Empty request")]
    EmptyRequest,

    /// Los bytes recibidos no son UTF-8 válido
    #[error("Request is not valid UTF-8")]
    InvalidEncoding,

    /// La request line no tiene exactamente 3 tokens
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// La versión no empieza con `HTTP/`
    #[error("Invalid protocol type: {0}")]
    InvalidProtocol(String),

    /// Versión distinta de 1.0 / 1.1
    #[error("Unsupported HTTP version: {0}")]
    UnsupportedVersion(String),

    /// Header sin `:` o con nombre vacío
    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),
}

impl ParseError {
    /// Texto corto que se envía como `Reason:` en la respuesta de error
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::EmptyRequest => "Empty Request",
            ParseError::InvalidEncoding => "Invalid Encoding",
            ParseError::InvalidRequestLine(_) => "Invalid Request Line",
            ParseError::InvalidProtocol(_) => "Invalid Protocol Type",
            ParseError::UnsupportedVersion(_) => "Invalid HTTP Version",
            ParseError::InvalidHeader(_) => "Invalid Header",
        }
    }
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Request target tal como llegó (ej: "/info?type=time")
    target: String,

    /// Versión HTTP ("HTTP/1.0" o "HTTP/1.1")
    version: String,

    /// Headers con el nombre en minúsculas como clave.
    /// Si un header se repite, gana el último.
    headers: HashMap<String, String>,

    /// Body del request, si había algo después de la línea vacía
    body: Option<String>,
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use hello_http::http::{Method, Request};
    ///
    /// let raw = b"GET /info?type=time HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), &Method::Get);
    /// assert_eq!(request.path(), "/info");
    /// assert_eq!(request.query(), Some("type=time"));
    /// assert_eq!(request.header("host"), Some("localhost"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str = std::str::from_utf8(buffer).map_err(|_| ParseError::InvalidEncoding)?;

        if request_str.is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Cabecera (request line + headers) y body
        let (head, body) = match request_str.split_once(HEADER_TERMINATOR) {
            Some((head, body)) => (head, Some(body)),
            None => (request_str.trim_end_matches("\r\n"), None),
        };

        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();

        // 1. Request line
        let (method, target, version) = Self::parse_request_line(request_line)?;

        // 2. Headers
        let headers = Self::parse_headers(lines)?;

        // 3. Body
        let body = Self::parse_body(body, &headers);

        Ok(Request {
            method,
            target,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path?query HTTP/1.1`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD TARGET VERSION
        let [method, target, version] = parts[..] else {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        };

        let number = version
            .strip_prefix("HTTP/")
            .ok_or_else(|| ParseError::InvalidProtocol(version.to_string()))?;

        if number != "1.0" && number != "1.1" {
            return Err(ParseError::UnsupportedVersion(version.to_string()));
        }

        Ok((
            Method::from_token(method),
            target.to_string(),
            version.to_string(),
        ))
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato: "Name: Value". Se corta en el primer `:`
    /// para que valores como `Host: localhost:12345` queden completos.
    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.is_empty() {
                break;
            }

            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;

            let name = name.trim();
            if name.is_empty() {
                return Err(ParseError::InvalidHeader(line.to_string()));
            }

            headers.insert(name.to_ascii_lowercase(), value.trim().to_string());
        }

        Ok(headers)
    }

    /// Extrae el body, recortado a `Content-Length` si el header es válido
    fn parse_body(raw: Option<&str>, headers: &HashMap<String, String>) -> Option<String> {
        let raw = raw?;

        let declared = headers
            .get("content-length")
            .and_then(|value| value.parse::<usize>().ok());

        let body = match declared {
            Some(length) if length < raw.len() => raw.get(..length).unwrap_or(raw),
            _ => raw,
        };

        if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        }
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request target completo, con query si la hay
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Path sin query (todo lo anterior al primer `?`)
    pub fn path(&self) -> &str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => &self.target,
        }
    }

    /// Query string (lo posterior al primer `?`), si existe
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }

    /// Obtiene todos los headers (claves en minúsculas)
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico, sin distinguir mayúsculas
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene el body del request, si no está vacío
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Indica si el body viene como `application/x-www-form-urlencoded`
    pub fn is_form_encoded(&self) -> bool {
        self.header("Content-Type")
            .is_some_and(|value| MediaType::FormUrlEncoded.matches(value))
    }
}
