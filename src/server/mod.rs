//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, una a la vez
//! 3. Lee y parsea un request HTTP
//! 4. Genera y envía una response HTTP
//! 5. Cierra la conexión
//!
//! No hay threads ni I/O asíncrono: mientras se atiende una conexión,
//! las demás esperan en el backlog.

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
