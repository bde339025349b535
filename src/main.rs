//! # Hello HTTP - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor. La configuración viene de argumentos
//! CLI o variables de entorno; el nivel de log, de `RUST_LOG`.

use hello_http::config::Config;
use hello_http::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hello_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("hello_http v{} iniciando", env!("CARGO_PKG_VERSION"));

    let config = Config::new();
    config.print_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "no se pudo iniciar el servidor");
            std::process::exit(1);
        }
    };

    // Bloquea para siempre; no hay shutdown ordenado
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "error fatal");
        std::process::exit(1);
    }
}
