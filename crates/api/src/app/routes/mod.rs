use axum::{http::StatusCode, routing::get, Router};

pub mod cats;

/// Router for every public endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(cats::router())
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
