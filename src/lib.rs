//! # Hello HTTP
//! src/lib.rs
//!
//! Servidor HTTP/1.x mínimo implementado desde cero: parsea a mano la
//! request line y los headers, enruta un conjunto fijo de paths y arma
//! las responses byte a byte.
//!
//! ## Arquitectura
//!
//! ```text
//! Listener → lectura acotada → Parser → Router → Handler → Response → close
//! ```
//!
//! - `http`: Parsing, lectura acotada, responses y status codes
//! - `router`: Tabla fija de rutas (método + path)
//! - `handlers`: Redirección, archivos estáticos, saludo y `/info`
//! - `assets`: Lectura de archivos estáticos y del template
//! - `server`: Listener TCP secuencial (una conexión a la vez)
//! - `config`: Argumentos CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use hello_http::config::Config;
//! use hello_http::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al abrir el puerto");
//! server.run().expect("Error en el servidor");
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;

pub use error::ServerError;
