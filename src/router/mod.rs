//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea método + path a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! La tabla de rutas es una constante: no se modifica en runtime.
//!
//! - Método distinto de GET/POST → `501 Not Implemented`
//! - Ninguna ruta coincide → `404 Not Found`
//! - El handler falla leyendo un archivo → `500 Internal Server Error`

use crate::assets::{AssetError, Assets};
use crate::handlers::{self, NOT_FOUND_REASON};
use crate::http::{Method, Request, Response, StatusCode};

/// Tipo de función handler
///
/// Un handler recibe el Request y los archivos estáticos, y retorna
/// una Response o el error de lectura de un archivo.
pub type Handler = fn(&Request, &Assets) -> Result<Response, AssetError>;

/// Forma en que una ruta compara el request target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// El target completo debe ser igual (sin query)
    Exact(&'static str),

    /// El target debe ser `path?query`, con un único `?`
    Query(&'static str),
}

impl Pattern {
    /// Verifica si el target del request coincide
    ///
    /// # Ejemplo
    /// ```
    /// use hello_http::router::Pattern;
    ///
    /// assert!(Pattern::Exact("/style").matches("/style"));
    /// assert!(!Pattern::Exact("/style").matches("/style?v=2"));
    /// assert!(Pattern::Query("/info").matches("/info?type=time"));
    /// assert!(!Pattern::Query("/info").matches("/info"));
    /// assert!(!Pattern::Query("/info").matches("/info?a?b"));
    /// ```
    pub fn matches(&self, target: &str) -> bool {
        match self {
            Pattern::Exact(path) => target == *path,
            Pattern::Query(path) => {
                let parts: Vec<&str> = target.split('?').collect();
                parts.len() == 2 && parts[0] == *path
            }
        }
    }
}

/// Una entrada de la tabla: (método, patrón) → handler
#[derive(Clone, Copy)]
pub struct Route {
    pub method: RouteMethod,
    pub pattern: Pattern,
    pub handler: Handler,
}

/// Métodos que pueden tener rutas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
}

impl RouteMethod {
    fn accepts(&self, method: &Method) -> bool {
        matches!(
            (self, method),
            (RouteMethod::Get, Method::Get) | (RouteMethod::Post, Method::Post)
        )
    }
}

/// Tabla de rutas del servidor
pub const ROUTES: &[Route] = &[
    Route {
        method: RouteMethod::Get,
        pattern: Pattern::Exact("/"),
        handler: handlers::redirect_home,
    },
    Route {
        method: RouteMethod::Get,
        pattern: Pattern::Exact("/style"),
        handler: handlers::stylesheet,
    },
    Route {
        method: RouteMethod::Get,
        pattern: Pattern::Exact("/background"),
        handler: handlers::background,
    },
    Route {
        method: RouteMethod::Get,
        pattern: Pattern::Exact("/hello-world"),
        handler: handlers::hello_world,
    },
    Route {
        method: RouteMethod::Get,
        pattern: Pattern::Query("/info"),
        handler: handlers::info,
    },
    Route {
        method: RouteMethod::Post,
        pattern: Pattern::Exact("/"),
        handler: handlers::redirect_home,
    },
    Route {
        method: RouteMethod::Post,
        pattern: Pattern::Exact("/hello-world"),
        handler: handlers::greet,
    },
];

/// Router que mapea (método, target) a handlers
#[derive(Clone, Copy)]
pub struct Router {
    routes: &'static [Route],
}

impl Router {
    /// Router con la tabla `ROUTES`
    pub fn new() -> Self {
        Self::with_routes(ROUTES)
    }

    /// Router con una tabla propia (útil en tests)
    pub fn with_routes(routes: &'static [Route]) -> Self {
        Self { routes }
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// # Ejemplo
    /// ```
    /// use hello_http::assets::Assets;
    /// use hello_http::http::{Request, StatusCode};
    /// use hello_http::router::Router;
    ///
    /// let router = Router::new();
    /// let assets = Assets::new("public");
    ///
    /// let request = Request::parse(b"DELETE / HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(router.route(&request, &assets).status(), StatusCode::NotImplemented);
    /// ```
    pub fn route(&self, request: &Request, assets: &Assets) -> Response {
        if let Method::Other(token) = request.method() {
            return Response::error(StatusCode::NotImplemented, token);
        }

        let route = self.routes.iter().find(|route| {
            route.method.accepts(request.method()) && route.pattern.matches(request.target())
        });

        let Some(route) = route else {
            return Response::error(StatusCode::NotFound, NOT_FOUND_REASON);
        };

        match (route.handler)(request, assets) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, path = request.target(), "archivo no disponible");
                Response::error(StatusCode::InternalServerError, "Resource Unavailable")
            }
        }
    }

    /// Rutas registradas
    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_handler(_req: &Request, _assets: &Assets) -> Result<Response, AssetError> {
        Ok(Response::ok(b"ok".to_vec(), crate::http::MediaType::TextPlain))
    }

    fn failing_handler(_req: &Request, assets: &Assets) -> Result<Response, AssetError> {
        assets.stylesheet().map(|_| Response::new(StatusCode::Ok))
    }

    const TEST_ROUTES: &[Route] = &[
        Route {
            method: RouteMethod::Get,
            pattern: Pattern::Exact("/test"),
            handler: test_handler,
        },
        Route {
            method: RouteMethod::Get,
            pattern: Pattern::Exact("/broken"),
            handler: failing_handler,
        },
    ];

    fn route(router: &Router, raw: &[u8]) -> Response {
        let request = Request::parse(raw).unwrap();
        router.route(&request, &Assets::new("/nonexistent"))
    }

    #[test]
    fn test_router_table() {
        assert_eq!(Router::new().routes().len(), 7);
        assert_eq!(Router::with_routes(TEST_ROUTES).routes().len(), 2);
    }

    #[test]
    fn test_route_found() {
        let router = Router::with_routes(TEST_ROUTES);
        let response = route(&router, b"GET /test HTTP/1.0\r\n\r\n");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"ok");
    }

    #[test]
    fn test_route_not_found() {
        let router = Router::with_routes(TEST_ROUTES);
        let response = route(&router, b"GET /nonexistent HTTP/1.0\r\n\r\n");

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.body(), b"404 Not Found: Reason: Content Not Found");
    }

    #[test]
    fn test_method_must_match() {
        let router = Router::with_routes(TEST_ROUTES);
        let response = route(&router, b"POST /test HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_unsupported_method() {
        let router = Router::new();

        for method in ["PUT", "DELETE", "HEAD", "PATCH"] {
            let raw = format!("{} /hello-world HTTP/1.1\r\n\r\n", method);
            let response = route(&router, raw.as_bytes());

            assert_eq!(response.status(), StatusCode::NotImplemented);
            let body = String::from_utf8_lossy(response.body()).to_string();
            assert_eq!(body, format!("501 Not Implemented: Reason: {}", method));
        }
    }

    #[test]
    fn test_missing_file_is_server_error() {
        let router = Router::with_routes(TEST_ROUTES);
        let response = route(&router, b"GET /broken HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::InternalServerError);
        assert_eq!(
            response.body(),
            b"500 Internal Server Error: Reason: Resource Unavailable"
        );
    }

    #[test]
    fn test_default_redirects() {
        let router = Router::new();

        for method in ["GET", "POST"] {
            let raw = format!("{} / HTTP/1.1\r\n\r\n", method);
            let response = route(&router, raw.as_bytes());

            assert_eq!(response.status(), StatusCode::Found);
            assert_eq!(response.header("Location"), Some("/hello-world"));
        }
    }

    #[test]
    fn test_post_to_unknown_path() {
        let response = route(&Router::new(), b"POST /style HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_query_on_exact_route_is_not_found() {
        let response = route(&Router::new(), b"GET /style?v=1 HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::NotFound);
    }
}
