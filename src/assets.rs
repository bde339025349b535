//! # Archivos estáticos y template
//! src/assets.rs
//!
//! Acceso a los tres archivos que sirve el servidor, relativos a un
//! directorio base (`--static-dir`):
//!
//! - `style.css`: hoja de estilos
//! - `background.jpg`: imagen de fondo
//! - `hello-world.html`: template con el marcador `__HELLO__`
//!
//! Se leen del disco en cada request, sin caché.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const STYLESHEET_FILE: &str = "style.css";
pub const IMAGE_FILE: &str = "background.jpg";
pub const TEMPLATE_FILE: &str = "hello-world.html";

/// Marcador que se reemplaza en el template
pub const PLACEHOLDER: &str = "__HELLO__";

/// Error al leer un archivo estático
#[derive(Debug, Error)]
#[error("cannot read {}: {source}", .path.display())]
pub struct AssetError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

impl AssetError {
    /// Ruta del archivo que falló
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Ubicación de los archivos estáticos
#[derive(Debug, Clone)]
pub struct Assets {
    root: PathBuf,
}

impl Assets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Contenido de `style.css`
    pub fn stylesheet(&self) -> Result<Vec<u8>, AssetError> {
        self.read(STYLESHEET_FILE)
    }

    /// Contenido de `background.jpg`
    pub fn image(&self) -> Result<Vec<u8>, AssetError> {
        self.read(IMAGE_FILE)
    }

    /// Template con `__HELLO__` reemplazado por `name`
    ///
    /// Es un reemplazo literal de substring, no un motor de templates.
    pub fn render_greeting(&self, name: &str) -> Result<String, AssetError> {
        let bytes = self.read(TEMPLATE_FILE)?;
        let template = String::from_utf8_lossy(&bytes);
        Ok(template.replace(PLACEHOLDER, name))
    }

    fn read(&self, file: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(file);
        fs::read(&path).map_err(|source| AssetError { path, source })
    }
}
