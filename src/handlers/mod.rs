//! # Handlers
//! src/handlers/mod.rs
//!
//! Cada handler recibe el request y la ubicación de los archivos
//! estáticos, y retorna una Response. Si falta un archivo, el error sube
//! al router, que lo convierte en `500`.
//!
//! - **pages**: redirección, estilos, imagen y saludo HTML
//! - **info**: valores generados (`/info?type=random|time`)

pub mod info;
pub mod pages;

pub use info::info;
pub use pages::{background, greet, hello_world, redirect_home, stylesheet};

/// Destino de la redirección de `/`
pub const HOME: &str = "/hello-world";

/// Razón usada en los 404
pub const NOT_FOUND_REASON: &str = "Content Not Found";
