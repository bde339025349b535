//! # Lectura acotada del request
//! src/http/reader.rs
//!
//! Lee del socket en bloques de tamaño fijo hasta tener el request
//! completo (headers + `Content-Length` bytes de body), hasta EOF, o hasta
//! superar el máximo permitido.

use super::request::HEADER_TERMINATOR;
use std::io::{self, Read};
use thiserror::Error;

/// Límites de lectura por conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Tamaño de cada `read()` sobre el socket
    pub chunk_size: usize,

    /// Máximo total de bytes aceptado por request
    pub max_bytes: usize,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            max_bytes: 8192,
        }
    }
}

/// Errores de lectura
#[derive(Debug, Error)]
pub enum ReadError {
    /// El request (o su `Content-Length` declarado) supera el límite
    #[error("request exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// Error de I/O del socket
    #[error("socket read failed: {0}")]
    Io(#[from] io::Error),
}

/// Lee un request completo respetando `limits`
///
/// Retorna un buffer vacío si el peer cerró sin enviar nada.
///
/// # Ejemplo
/// ```
/// use hello_http::http::reader::{read_request, ReadLimits};
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b"GET / HTTP/1.1\r\n\r\n".to_vec());
/// let raw = read_request(&mut input, ReadLimits::default()).unwrap();
/// assert_eq!(raw, b"GET / HTTP/1.1\r\n\r\n");
/// ```
pub fn read_request<R: Read>(stream: &mut R, limits: ReadLimits) -> Result<Vec<u8>, ReadError> {
    let mut buffer = Vec::with_capacity(limits.chunk_size);
    let mut chunk = vec![0u8; limits.chunk_size.max(1)];

    // Largo total (headers + body), conocido una vez que llegan los headers
    let mut expected: Option<usize> = None;

    loop {
        let bytes_read = match stream.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if bytes_read == 0 {
            break;
        }

        // El terminador puede haber quedado partido entre dos bloques
        let search_from = buffer
            .len()
            .saturating_sub(HEADER_TERMINATOR.len() - 1);
        buffer.extend_from_slice(&chunk[..bytes_read]);

        if buffer.len() > limits.max_bytes {
            return Err(ReadError::TooLarge {
                limit: limits.max_bytes,
            });
        }

        if expected.is_none() {
            expected = find_head_end(&buffer, search_from)
                .map(|head_end| head_end.saturating_add(content_length(&buffer[..head_end])));
        }

        match expected {
            Some(total) if total > limits.max_bytes => {
                return Err(ReadError::TooLarge {
                    limit: limits.max_bytes,
                });
            }
            Some(total) if buffer.len() >= total => break,
            _ => {}
        }
    }

    Ok(buffer)
}

/// Posición siguiente al `\r\n\r\n`, buscando desde `from`
fn find_head_end(buffer: &[u8], from: usize) -> Option<usize> {
    let terminator = HEADER_TERMINATOR.as_bytes();
    buffer
        .get(from..)?
        .windows(terminator.len())
        .position(|window| window == terminator)
        .map(|position| from + position + terminator.len())
}

/// `Content-Length` declarado en la cabecera, o 0
///
/// Si el header se repite gana el último, igual que en `Request::parse`.
fn content_length(head: &[u8]) -> usize {
    let head = String::from_utf8_lossy(head);
    head.split("\r\n")
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case("Content-Length"))
        .last()
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0)
}
