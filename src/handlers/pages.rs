//! # Páginas
//! src/handlers/pages.rs
//!
//! - `GET|POST /` → redirección a `/hello-world`
//! - `GET /style` → `style.css`
//! - `GET /background` → `background.jpg`
//! - `GET /hello-world` → template saludando a "World"
//! - `POST /hello-world` → template saludando al `name` del formulario

use super::HOME;
use crate::assets::{AssetError, Assets};
use crate::http::form;
use crate::http::{MediaType, Request, Response, StatusCode};

/// Nombre usado por `GET /hello-world`
pub const DEFAULT_NAME: &str = "World";

/// Campo del formulario de `POST /hello-world`
pub const NAME_FIELD: &str = "name";

pub fn redirect_home(_req: &Request, _assets: &Assets) -> Result<Response, AssetError> {
    Ok(Response::redirect(HOME))
}

pub fn stylesheet(_req: &Request, assets: &Assets) -> Result<Response, AssetError> {
    Ok(Response::ok(assets.stylesheet()?, MediaType::Css))
}

pub fn background(_req: &Request, assets: &Assets) -> Result<Response, AssetError> {
    Ok(Response::ok(assets.image()?, MediaType::Jpeg))
}

/// Handler para `GET /hello-world`
pub fn hello_world(_req: &Request, assets: &Assets) -> Result<Response, AssetError> {
    render(assets, DEFAULT_NAME)
}

/// Handler para `POST /hello-world`
///
/// Requiere `Content-Type: application/x-www-form-urlencoded` y un body
/// no vacío con la forma `name=VALUE`.
///
/// # Errores (respondidos al cliente)
/// - 400 `Invalid Content Type`: falta el content type o el body
/// - 400 `Invalid Parameters`: el body no es exactamente `name=VALUE`
pub fn greet(req: &Request, assets: &Assets) -> Result<Response, AssetError> {
    let body = match req.body() {
        Some(body) if req.is_form_encoded() => body,
        _ => {
            return Ok(Response::error(
                StatusCode::BadRequest,
                "Invalid Content Type",
            ));
        }
    };

    match form::single_field(body, NAME_FIELD) {
        Ok(name) => render(assets, &name),
        Err(e) => {
            tracing::debug!(error = %e, "formulario rechazado");
            Ok(Response::error(StatusCode::BadRequest, "Invalid Parameters"))
        }
    }
}

fn render(assets: &Assets, name: &str) -> Result<Response, AssetError> {
    let html = assets.render_greeting(name)?;
    Ok(Response::ok(html.into_bytes(), MediaType::Html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TEMPLATE_FILE;
    use std::fs;
    use std::path::PathBuf;

    fn assets_with_template(name: &str) -> (Assets, PathBuf) {
        let dir = std::env::temp_dir().join(format!(
            "hello_http_pages_{}_{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(TEMPLATE_FILE), "<h1>Hello, __HELLO__!</h1>").unwrap();
        (Assets::new(&dir), dir)
    }

    fn post(content_type: Option<&str>, body: &str) -> Request {
        let mut raw = String::from("POST /hello-world HTTP/1.1\r\n");
        if let Some(content_type) = content_type {
            raw.push_str(&format!("Content-Type: {}\r\n", content_type));
        }
        raw.push_str(&format!("Content-Length: {}\r\n\r\n{}", body.len(), body));
        Request::parse(raw.as_bytes()).unwrap()
    }

    const FORM: Option<&str> = Some("application/x-www-form-urlencoded");

    #[test]
    fn test_redirect_home() {
        let req = Request::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        let response = redirect_home(&req, &Assets::new(".")).unwrap();

        assert_eq!(response.status(), StatusCode::Found);
        assert_eq!(response.header("Location"), Some("/hello-world"));
    }

    #[test]
    fn test_hello_world_uses_default_name() {
        let (assets, dir) = assets_with_template("get");
        let req = Request::parse(b"GET /hello-world HTTP/1.1\r\n\r\n").unwrap();

        let response = hello_world(&req, &assets).unwrap();
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"<h1>Hello, World!</h1>");
        assert_eq!(response.header("Content-Type"), Some("text/html; charset=utf-8"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_greet_with_decoded_name() {
        let (assets, dir) = assets_with_template("post");

        let response = greet(&post(FORM, "name=Ada%20Lovelace"), &assets).unwrap();
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"<h1>Hello, Ada Lovelace!</h1>");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_greet_requires_form_content_type() {
        let assets = Assets::new("/nonexistent");

        for content_type in [None, Some("text/plain"), Some("multipart/form-data")] {
            let response = greet(&post(content_type, "name=Alice"), &assets).unwrap();
            assert_eq!(response.status(), StatusCode::BadRequest);
            assert!(String::from_utf8_lossy(response.body()).contains("Invalid Content Type"));
        }
    }

    #[test]
    fn test_greet_requires_body() {
        let response = greet(&post(FORM, ""), &Assets::new("/nonexistent")).unwrap();
        assert!(String::from_utf8_lossy(response.body()).contains("Invalid Content Type"));
    }

    #[test]
    fn test_greet_invalid_parameters() {
        let assets = Assets::new("/nonexistent");

        for body in ["Alice", "nombre=Alice", "name=a=b", "name=Alice&x=1=2"] {
            let response = greet(&post(FORM, body), &assets).unwrap();
            assert_eq!(response.status(), StatusCode::BadRequest);
            assert!(
                String::from_utf8_lossy(response.body()).contains("Invalid Parameters"),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let req = Request::parse(b"GET /hello-world HTTP/1.1\r\n\r\n").unwrap();
        assert!(hello_world(&req, &Assets::new("/nonexistent")).is_err());
    }
}
