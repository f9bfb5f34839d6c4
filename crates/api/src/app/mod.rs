//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: catalog provider wiring and per-request lookup construction
//! - `routes/`: HTTP routes + handlers (stock endpoints, validation hook)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
}
