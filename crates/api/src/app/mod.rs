//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the cat service and storage-gateway selection
//! - `routes/`: HTTP routes + handlers
//! - `extract.rs`: typed path/body extractors shared by the routes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

pub use services::CatService;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(service: Arc<CatService>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_log_middleware))
            .layer(Extension(service)),
    )
}
