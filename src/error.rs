//! # Errores del servidor
//! src/error.rs
//!
//! Errores que impiden arrancar o mantener el listener. Los errores de
//! un request individual nunca llegan aquí: se responden al cliente.

use crate::config::ConfigError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuración inválida
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// El host no resuelve a ninguna dirección
    #[error("cannot resolve address {0}")]
    Resolve(String),

    /// No se pudo abrir el socket de escucha
    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Error de I/O del listener
    #[error("listener I/O error: {0}")]
    Io(#[from] io::Error),
}
