//! # Servidor TCP secuencial
//! src/server/tcp.rs
//!
//! Acepta una conexión, atiende un único request, escribe la response y
//! cierra. Recién entonces acepta la siguiente.
//!
//! No hay timeouts de lectura: un cliente que no envía nada bloquea al
//! servidor hasta que cierre la conexión. La única excepción es el descarte
//! que sigue a un `413`, acotado en bytes y en tiempo.

use crate::assets::Assets;
use crate::config::Config;
use crate::error::ServerError;
use crate::http::{read_request, ParseError, ReadError, Request, Response, StatusCode};
use crate::router::Router;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Máximo de bytes que se descartan después de un `413`
const DISCARD_LIMIT: u64 = 1024 * 1024;

/// Espera máxima por cada lectura del descarte
const DISCARD_TIMEOUT: Duration = Duration::from_secs(2);

/// Servidor HTTP de una conexión a la vez
pub struct Server {
    config: Config,
    router: Router,
    assets: Assets,
    listener: TcpListener,
}

impl Server {
    /// Valida la configuración y abre el socket de escucha
    ///
    /// Usa `SO_REUSEADDR` y el backlog configurado.
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        config.validate()?;

        let address = config.address();
        let addr = address
            .to_socket_addrs()
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })?
            .next()
            .ok_or_else(|| ServerError::Resolve(address.clone()))?;

        let listener = listen(addr, config.backlog).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

        let assets = Assets::new(&config.static_dir);
        let router = Router::new();

        tracing::info!(
            address = %addr,
            backlog = config.backlog,
            routes = router.routes().len(),
            static_dir = %assets.root().display(),
            "servidor escuchando"
        );

        Ok(Self {
            config,
            router,
            assets,
            listener,
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Loop principal: acepta y atiende conexiones para siempre
    ///
    /// Los errores de una conexión se registran y el loop continúa.
    pub fn run(&self) -> Result<(), ServerError> {
        tracing::info!("modo secuencial: una conexión a la vez");

        for stream in self.listener.incoming() {
            let mut stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    tracing::warn!(error = %e, "error al aceptar conexión");
                    continue;
                }
            };

            let peer = stream
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "unknown".to_string());

            match self.handle_connection(&mut stream, &peer) {
                // Quedan bytes del request sin leer
                Ok(Some(StatusCode::PayloadTooLarge)) => discard_remaining(&stream, &peer),
                Ok(_) => {}
                Err(e) => tracing::warn!(peer = %peer, error = %e, "error en la conexión"),
            }
            // `stream` se cierra al salir de este scope
        }

        Ok(())
    }

    /// Atiende un request sobre `stream` y escribe exactamente una response
    ///
    /// Retorna `None` si el peer cerró sin enviar un request.
    pub fn handle_connection<S: Read + Write>(
        &self,
        stream: &mut S,
        peer: &str,
    ) -> io::Result<Option<StatusCode>> {
        let start = Instant::now();

        let raw = match read_request(stream, self.config.read_limits()) {
            Ok(raw) => raw,
            Err(ReadError::TooLarge { limit }) => {
                tracing::warn!(peer = %peer, limit, "request demasiado grande");
                let response = Response::error(StatusCode::PayloadTooLarge, "Request Too Large");
                return send(stream, &response).map(Some);
            }
            Err(ReadError::Io(e)) => return Err(e),
        };

        if raw.is_empty() {
            tracing::debug!(peer = %peer, "conexión cerrada sin datos");
            return Ok(None);
        }

        tracing::debug!(peer = %peer, request = %String::from_utf8_lossy(&raw), "request recibido");

        let (response, line) = match Request::parse(&raw) {
            Ok(request) => {
                let line = format!(
                    "{} {} {}",
                    request.method(),
                    request.target(),
                    request.version()
                );
                (self.router.route(&request, &self.assets), line)
            }
            Err(ParseError::EmptyRequest) => {
                tracing::debug!(peer = %peer, "request vacío");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(peer = %peer, error = %e, "request inválido");
                (Response::error(StatusCode::BadRequest, e.reason()), "-".to_string())
            }
        };

        let status = send(stream, &response)?;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        if status.is_server_error() {
            tracing::warn!(
                peer = %peer,
                request = %line,
                status = status.as_u16(),
                latency_ms,
                "request fallido"
            );
        } else {
            tracing::info!(
                peer = %peer,
                request = %line,
                status = status.as_u16(),
                bytes = response.body().len(),
                latency_ms,
                "request atendido"
            );
        }

        Ok(Some(status))
    }
}

/// Socket de escucha con `SO_REUSEADDR` y backlog explícito
fn listen(addr: SocketAddr, backlog: i32) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(backlog)?;
    Ok(socket.into())
}

/// Cierra la escritura y descarta lo que el cliente siga enviando
///
/// Si el socket se cierra con datos sin leer, el kernel responde con RST
/// y el cliente puede perder la response ya escrita.
fn discard_remaining(stream: &TcpStream, peer: &str) {
    let discarded = stream
        .shutdown(Shutdown::Write)
        .and_then(|_| stream.set_read_timeout(Some(DISCARD_TIMEOUT)))
        .and_then(|_| io::copy(&mut stream.take(DISCARD_LIMIT), &mut io::sink()));

    match discarded {
        Ok(bytes) => tracing::debug!(peer = %peer, bytes, "resto del request descartado"),
        Err(e) => tracing::debug!(peer = %peer, error = %e, "descarte interrumpido"),
    }
}

fn send<W: Write>(stream: &mut W, response: &Response) -> io::Result<StatusCode> {
    stream.write_all(&response.to_bytes())?;
    stream.flush()?;
    Ok(response.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Stream en memoria: lee de `input`, escribe en `output`
    struct MockStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl MockStream {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
            }
        }

        fn response_text(&self) -> String {
            String::from_utf8_lossy(&self.output).to_string()
        }
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn test_server(config: Config) -> Server {
        Server::bind(Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..config
        })
        .unwrap()
    }

    fn exchange(server: &Server, raw: &[u8]) -> (Option<StatusCode>, String) {
        let mut stream = MockStream::new(raw);
        let status = server.handle_connection(&mut stream, "test").unwrap();
        (status, stream.response_text())
    }

    #[test]
    fn test_bind_ephemeral_port() {
        let server = test_server(Config::default());
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn test_bind_rejects_invalid_config() {
        let config = Config {
            backlog: 0,
            ..Config::default()
        };
        assert!(matches!(Server::bind(config), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_redirect() {
        let server = test_server(Config::default());
        let (status, text) = exchange(&server, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");

        assert_eq!(status, Some(StatusCode::Found));
        assert!(text.starts_with("HTTP/1.1 302 Found\r\n"));
        assert!(text.contains("Location: /hello-world\r\n"));
        assert!(text.contains("Connection: close\r\n"));
    }

    #[test]
    fn test_empty_connection_gets_no_response() {
        let server = test_server(Config::default());
        let (status, text) = exchange(&server, b"");

        assert_eq!(status, None);
        assert!(text.is_empty());
    }

    #[test]
    fn test_whitespace_only_request_is_bad_request() {
        let server = test_server(Config::default());

        for raw in [&b"\r\n\r\n"[..], b"   \r\n\r\n", b"\t\r\n"] {
            let (status, text) = exchange(&server, raw);

            assert_eq!(status, Some(StatusCode::BadRequest));
            assert!(text.ends_with("400 Bad Request: Reason: Invalid Request Line"));
        }
    }

    #[test]
    fn test_oversized_request_is_drained_before_close() {
        let server = test_server(Config::default());
        let addr = server.local_addr().unwrap();

        // Muy por encima del límite y no múltiplo del bloque de lectura
        let client = std::thread::spawn(move || {
            let mut stream = TcpStream::connect(addr).unwrap();
            stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
            let mut raw = b"GET / HTTP/1.1\r\nX-Pad: ".to_vec();
            raw.resize(40_000, b'a');
            stream.write_all(&raw).unwrap();

            let mut response = Vec::new();
            stream.read_to_end(&mut response).map(|_| response)
        });

        let (mut stream, _) = server.listener.accept().unwrap();
        let status = server.handle_connection(&mut stream, "test").unwrap();
        assert_eq!(status, Some(StatusCode::PayloadTooLarge));
        discard_remaining(&stream, "test");
        drop(stream);

        let response = client.join().unwrap().expect("clean close, not a reset");
        assert!(response.starts_with(b"HTTP/1.1 413 Payload Too Large\r\n"));
    }

    #[test]
    fn test_malformed_request_line() {
        let server = test_server(Config::default());
        let (status, text) = exchange(&server, b"GARBAGE\r\n\r\n");

        assert_eq!(status, Some(StatusCode::BadRequest));
        assert!(text.ends_with("400 Bad Request: Reason: Invalid Request Line"));
    }

    #[test]
    fn test_invalid_protocol_and_version() {
        let server = test_server(Config::default());

        let (_, text) = exchange(&server, b"GET / HTTX/1.1\r\n\r\n");
        assert!(text.ends_with("Reason: Invalid Protocol Type"));

        let (_, text) = exchange(&server, b"GET / HTTP/0.9\r\n\r\n");
        assert!(text.ends_with("Reason: Invalid HTTP Version"));
    }

    #[test]
    fn test_oversized_request() {
        let server = test_server(Config {
            max_request_bytes: 64,
            read_chunk_bytes: 16,
            ..Config::default()
        });

        let mut raw = b"GET / HTTP/1.1\r\nX-Pad: ".to_vec();
        raw.extend(std::iter::repeat(b'a').take(100));
        let (status, text) = exchange(&server, &raw);

        assert_eq!(status, Some(StatusCode::PayloadTooLarge));
        assert!(text.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
        assert!(text.ends_with("Reason: Request Too Large"));
    }

    #[test]
    fn test_missing_static_dir_is_500() {
        let server = test_server(Config {
            static_dir: "/definitely/not/here".to_string(),
            ..Config::default()
        });

        let (status, text) = exchange(&server, b"GET /style HTTP/1.1\r\n\r\n");
        assert_eq!(status, Some(StatusCode::InternalServerError));
        assert!(text.ends_with("Reason: Resource Unavailable"));

        // El servidor sigue atendiendo después del error
        let (status, _) = exchange(&server, b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(status, Some(StatusCode::Found));
    }

    #[test]
    fn test_no_header_leak_between_requests() {
        let server = test_server(Config::default());

        let (_, first) = exchange(&server, b"GET / HTTP/1.1\r\n\r\n");
        let (_, second) = exchange(&server, b"GET /info?type=bogus HTTP/1.1\r\n\r\n");

        assert!(first.contains("Location:"));
        assert!(!second.contains("Location:"));
        assert_eq!(second.matches("Connection: close").count(), 1);
        assert_eq!(second.matches("Content-Length:").count(), 1);
        assert!(second.ends_with("\r\n\r\nNo Data"));
    }
}
