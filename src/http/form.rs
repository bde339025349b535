//! # Bodies form-encoded
//! src/http/form.rs
//!
//! El único formulario que entiende el servidor es `name=VALUE`.

use thiserror::Error;

/// Errores al interpretar un body `application/x-www-form-urlencoded`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// El body no tiene la forma `key=value`
    #[error("form body must be a single key=value pair, got {0:?}")]
    Malformed(String),

    /// La clave no es la esperada
    #[error("expected field {expected:?}, got {found:?}")]
    UnexpectedField { expected: String, found: String },
}

/// Extrae el valor (decodificado) de un body con un único campo `field`
///
/// El body debe partirse en `=` en exactamente dos piezas.
///
/// # Ejemplo
/// ```
/// use hello_http::http::form::single_field;
///
/// assert_eq!(single_field("name=Ada%20Lovelace", "name").unwrap(), "Ada Lovelace");
/// assert!(single_field("name=a=b", "name").is_err());
/// assert!(single_field("nombre=Ada", "name").is_err());
/// ```
pub fn single_field(body: &str, field: &str) -> Result<String, FormError> {
    let parts: Vec<&str> = body.split('=').collect();

    let [key, value] = parts[..] else {
        return Err(FormError::Malformed(body.to_string()));
    };

    if key != field {
        return Err(FormError::UnexpectedField {
            expected: field.to_string(),
            found: key.to_string(),
        });
    }

    Ok(percent_decode(value))
}

/// Decodifica `%XX` y `+` (espacio)
///
/// Las secuencias `%` inválidas se dejan tal cual. Los bytes decodificados
/// que no formen UTF-8 válido se reemplazan por U+FFFD.
pub fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => match bytes.get(i + 1..i + 3).and_then(hex_pair) {
                Some(byte) => {
                    decoded.push(byte);
                    i += 3;
                }
                None => {
                    decoded.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            other => {
                decoded.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_pair(pair: &[u8]) -> Option<u8> {
    // from_str_radix acepta un signo inicial ("+1")
    if !pair.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = std::str::from_utf8(pair).ok()?;
    u8::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain() {
        assert_eq!(percent_decode("Alice"), "Alice");
    }

    #[test]
    fn test_decode_escapes() {
        assert_eq!(percent_decode("hello%20world"), "hello world");
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("Jos%C3%A9"), "José");
        assert_eq!(percent_decode("%3Cb%3E"), "<b>");
    }

    #[test]
    fn test_decode_invalid_sequences_kept() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zzok"), "%zzok");
        assert_eq!(percent_decode("%4"), "%4");
    }

    #[test]
    fn test_single_field_ok() {
        assert_eq!(single_field("name=Alice", "name").unwrap(), "Alice");
        assert_eq!(single_field("name=", "name").unwrap(), "");
    }

    #[test]
    fn test_single_field_errors() {
        assert!(matches!(
            single_field("Alice", "name"),
            Err(FormError::Malformed(_))
        ));
        assert!(matches!(
            single_field("name=Alice&age=3=", "name"),
            Err(FormError::Malformed(_))
        ));
        assert!(matches!(
            single_field("user=Alice", "name"),
            Err(FormError::UnexpectedField { .. })
        ));
    }
}
