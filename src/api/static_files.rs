//! Static file collaborator.
//!
//! Serves files under the configured root with `tower-http`'s `ServeDir`,
//! which guards against path traversal and guesses the content type
//! from the extension. Methods other than `GET` and `HEAD` get `405`.

use std::path::Path;

use axum::Router;
use axum::extract::Request;
use axum::handler::HandlerWithoutStateExt;
use axum::http::{Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tower_http::services::ServeDir;

/// Body returned for paths that resolve to no file.
pub const NOT_FOUND_BODY: &str = "File not found";

/// Body returned for methods other than `GET` and `HEAD`.
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method not allowed";

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

async fn reads_only(request: Request, next: Next) -> Response {
    if matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, HEAD")],
        METHOD_NOT_ALLOWED_BODY,
    )
        .into_response()
}

/// Builds a router that serves every path from `root`.
pub fn router(root: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root).not_found_service(not_found.into_service()))
        .layer(middleware::from_fn(reads_only))
}
