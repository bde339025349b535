//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Implementación a mano del subconjunto de HTTP/1.0 y HTTP/1.1 que usa
//! el servidor. Incluye:
//!
//! - Lectura acotada del socket
//! - Parsing de requests (request line, headers, body)
//! - Decodificación del formulario `name=...`
//! - Construcción de responses y códigos de estado
//!
//! No hay conexiones persistentes, pipelining ni chunked encoding:
//! un request, una response, y se cierra la conexión.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Connection: close\r\n
//! Content-Length: 7\r\n
//! Content-Type: text/plain; charset=UTF-8\r\n
//! \r\n
//! No Data
//! ```

pub mod form;
pub mod media;
pub mod reader;
pub mod request;
pub mod response;
pub mod status;

// Re-exportamos los tipos principales para facilitar su uso
pub use media::MediaType;
pub use reader::{read_request, ReadError, ReadLimits};
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
