//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Este módulo proporciona una API para construir respuestas HTTP
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! Hay tres formas de respuesta:
//!
//! - **Éxito**: `200 OK` con el body y el `Content-Type` que indique el handler
//! - **Redirección**: `302 Found` con header `Location`
//! - **Error**: cualquier 4xx/5xx con body `"<code> <phrase>: Reason: <reason>"`
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 302 Found\r\n
//! Connection: close\r\n
//! Location: /hello-world\r\n
//! Content-Type: text/plain; charset=UTF-8\r\n
//! Content-Length: 33\r\n
//! \r\n
//! 302 Found: Location: /hello-world
//! ```
//!
//! Cada `Response` es un valor nuevo por request: los headers nunca se
//! acumulan entre una petición y la siguiente.

use super::{MediaType, StatusCode};

/// Versión usada en todas las status lines
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Representa una respuesta HTTP completa, siempre en memoria
#[derive(Debug, Clone)]
pub struct Response {
    /// Versión de la status line
    version: &'static str,

    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción.
    /// Un Vec mantiene el orden en que se escriben al socket.
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser binario)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Incluye siempre `Connection: close`. `Content-Length` se agrega al
    /// asignar el body (o en `to_bytes` si nunca se asignó).
    pub fn new(status: StatusCode) -> Self {
        let mut response = Self {
            version: DEFAULT_VERSION,
            status,
            headers: Vec::new(),
            body: Vec::new(),
        };
        response.add_header("Connection", "close");
        response
    }

    /// Respuesta `200 OK` con body y `Content-Type`
    ///
    /// # Ejemplo
    /// ```
    /// use hello_http::http::{MediaType, Response, StatusCode};
    ///
    /// let response = Response::ok(b"body { color: red; }".to_vec(), MediaType::Css);
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// assert_eq!(response.header("Content-Length"), Some("20"));
    /// ```
    pub fn ok(body: Vec<u8>, media: MediaType) -> Self {
        Self::new(StatusCode::Ok)
            .with_body_bytes(body)
            .with_header("Content-Type", media.as_str())
    }

    /// Respuesta `302 Found` hacia `target`
    ///
    /// # Ejemplo
    /// ```
    /// use hello_http::http::Response;
    ///
    /// let response = Response::redirect("/hello-world");
    /// assert_eq!(response.header("Location"), Some("/hello-world"));
    /// assert_eq!(response.body(), b"302 Found: Location: /hello-world");
    /// ```
    pub fn redirect(target: &str) -> Self {
        let status = StatusCode::Found;
        let body = format!("{}: Location: {}", status, target);
        Self::new(status)
            .with_header("Location", target)
            .with_header("Content-Type", MediaType::TextPlain.as_str())
            .with_body(&body)
    }

    /// Crea una respuesta de error en texto plano
    ///
    /// Formato del body: `"<code> <phrase>: Reason: <reason>"`
    ///
    /// # Ejemplo
    /// ```
    /// use hello_http::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotImplemented, "PUT");
    /// assert_eq!(response.body(), b"501 Not Implemented: Reason: PUT");
    /// ```
    pub fn error(status: StatusCode, reason: &str) -> Self {
        let body = format!("{}: Reason: {}", status, reason);
        Self::new(status)
            .with_header("Content-Type", MediaType::TextPlain.as_str())
            .with_body(&body)
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe (sin distinguir mayúsculas), se sobrescribe
    /// en su posición original.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para respuestas binarias (la imagen de fondo).
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let length = self.body.len().to_string();
        self.add_header("Content-Length", &length);
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        let status_line = format!("{} {}\r\n", self.version, self.status);
        result.extend_from_slice(status_line.as_bytes());

        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }
        if self.header("Content-Length").is_none() {
            let header_line = format!("Content-Length: {}\r\n", self.body.len());
            result.extend_from_slice(header_line.as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene la versión de la status line
    pub fn version(&self) -> &str {
        self.version
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header específico (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
