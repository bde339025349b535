//! # Tipos de contenido
//! src/http/media.rs
//!
//! Conjunto cerrado de media types que entiende el servidor.

/// Media types soportados, tanto para `Content-Type` de respuestas
/// como para detectar bodies form-encoded en requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    TextPlain,
    Css,
    Html,
    Jpeg,
    FormUrlEncoded,
}

impl MediaType {
    /// Valor completo para el header `Content-Type`
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::TextPlain => "text/plain; charset=UTF-8",
            MediaType::Css => "text/css; charset=utf-8",
            MediaType::Html => "text/html; charset=utf-8",
            // Binario: sin parámetro charset
            MediaType::Jpeg => "image/jpeg",
            MediaType::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }

    /// Parte `type/subtype` sin parámetros
    pub fn essence(&self) -> &'static str {
        let full = self.as_str();
        match full.split_once(';') {
            Some((essence, _)) => essence,
            None => full,
        }
    }

    /// Indica si el valor de un header `Content-Type` corresponde a este
    /// media type. Se ignoran parámetros (`; charset=...`) y mayúsculas.
    ///
    /// # Ejemplo
    /// ```
    /// use hello_http::http::MediaType;
    ///
    /// assert!(MediaType::FormUrlEncoded.matches("application/x-www-form-urlencoded"));
    /// assert!(MediaType::FormUrlEncoded.matches("Application/X-WWW-Form-Urlencoded; charset=UTF-8"));
    /// assert!(!MediaType::FormUrlEncoded.matches("multipart/form-data"));
    /// ```
    pub fn matches(&self, header_value: &str) -> bool {
        let essence = header_value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        essence.eq_ignore_ascii_case(self.essence())
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
