//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y
//! variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./hello_http --port 8080 --static-dir ./public --max-request-bytes 16384
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=127.0.0.1 STATIC_DIR=./public ./hello_http
//! ```

use crate::http::ReadLimits;
use clap::Parser;
use thiserror::Error;

/// Valores inválidos en la configuración
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("listen backlog must be >= 1")]
    ZeroBacklog,

    #[error("read chunk size must be >= 1")]
    ZeroChunk,

    #[error("max request bytes ({max}) must be >= read chunk size ({chunk})")]
    MaxBelowChunk { max: usize, chunk: usize },
}

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "hello_http")]
#[command(about = "Servidor HTTP/1.x secuencial: un request por conexión")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "12345", env = "HTTP_PORT")]
    pub port: u16,

    /// Tamaño de la cola de conexiones pendientes (listen backlog)
    #[arg(long, default_value = "16", env = "LISTEN_BACKLOG")]
    pub backlog: i32,

    /// Directorio con style.css, background.jpg y hello-world.html
    #[arg(long = "static-dir", default_value = "public", env = "STATIC_DIR")]
    pub static_dir: String,

    /// Máximo de bytes aceptados por request (más → 413)
    #[arg(long = "max-request-bytes", default_value = "8192", env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Bytes leídos del socket en cada read()
    #[arg(long = "read-chunk-bytes", default_value = "1024", env = "READ_CHUNK_BYTES")]
    pub read_chunk_bytes: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI y entorno
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use hello_http::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:12345");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Límites de lectura por conexión
    pub fn read_limits(&self) -> ReadLimits {
        ReadLimits {
            chunk_size: self.read_chunk_bytes,
            max_bytes: self.max_request_bytes,
        }
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backlog < 1 {
            return Err(ConfigError::ZeroBacklog);
        }
        if self.read_chunk_bytes == 0 {
            return Err(ConfigError::ZeroChunk);
        }
        if self.max_request_bytes < self.read_chunk_bytes {
            return Err(ConfigError::MaxBelowChunk {
                max: self.max_request_bytes,
                chunk: self.read_chunk_bytes,
            });
        }

        Ok(())
    }

    /// Registra un resumen de la configuración en el log
    pub fn print_summary(&self) {
        tracing::info!(
            address = %self.address(),
            backlog = self.backlog,
            static_dir = %self.static_dir,
            max_request_bytes = self.max_request_bytes,
            read_chunk_bytes = self.read_chunk_bytes,
            "configuración cargada"
        );
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 12345,
            backlog: 16,
            static_dir: "public".to_string(),
            max_request_bytes: 8192,
            read_chunk_bytes: 1024,
        }
    }
}
