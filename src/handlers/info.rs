//! # Valores generados
//! src/handlers/info.rs
//!
//! `GET /info?type=VALUE` responde texto plano:
//!
//! - `type=random` → entero aleatorio de 64 bits con signo
//! - `type=time` → fecha actual en formato HTTP-date (RFC 7231)
//! - cualquier otro valor → `No Data`
//!
//! La query debe ser exactamente un fragmento `type=VALUE`; no es un
//! parser general de query strings.

use super::NOT_FOUND_REASON;
use crate::assets::{AssetError, Assets};
use crate::http::{MediaType, Request, Response, StatusCode};
use rand::Rng;
use std::time::SystemTime;

/// Respuesta para tipos desconocidos
pub const NO_DATA: &str = "No Data";

/// Qué valor pide la query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoKind {
    Random,
    Time,
    Unknown(String),
}

impl InfoKind {
    /// Interpreta la query `type=VALUE`
    ///
    /// Retorna `None` si la query no tiene esa forma.
    ///
    /// # Ejemplo
    /// ```
    /// use hello_http::handlers::info::InfoKind;
    ///
    /// assert_eq!(InfoKind::from_query("type=time"), Some(InfoKind::Time));
    /// assert_eq!(InfoKind::from_query("type=foo"), Some(InfoKind::Unknown("foo".into())));
    /// assert_eq!(InfoKind::from_query("kind=time"), None);
    /// ```
    pub fn from_query(query: &str) -> Option<Self> {
        let (key, value) = query.split_once('=')?;
        if key != "type" {
            return None;
        }

        Some(match value {
            "random" => InfoKind::Random,
            "time" => InfoKind::Time,
            other => InfoKind::Unknown(other.to_string()),
        })
    }

    /// Genera el texto de la respuesta
    pub fn render(&self) -> String {
        match self {
            InfoKind::Random => random_value().to_string(),
            InfoKind::Time => current_time(),
            InfoKind::Unknown(_) => NO_DATA.to_string(),
        }
    }
}

/// Entero uniforme en todo el rango de `i64`
pub fn random_value() -> i64 {
    rand::thread_rng().gen()
}

/// Fecha actual, ej: `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn current_time() -> String {
    httpdate::fmt_http_date(SystemTime::now())
}

/// Handler para `GET /info?type=VALUE`
pub fn info(req: &Request, _assets: &Assets) -> Result<Response, AssetError> {
    let kind = req.query().and_then(InfoKind::from_query);

    let response = match kind {
        Some(kind) => Response::ok(kind.render().into_bytes(), MediaType::TextPlain),
        None => Response::error(StatusCode::NotFound, NOT_FOUND_REASON),
    };

    Ok(response)
}
