//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the dashboard views bound to a CRM source
//! - `routes/`: HTTP routes + handlers (one file per page family)
//! - `dto.rs`: query parsing and view-state responses
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crmdash_infra::{CrmSource, DashboardConfig};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(source: Arc<dyn CrmSource>, config: DashboardConfig) -> Router {
    let services = Arc::new(services::AppServices::new(source, config));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_id))
                .layer(Extension(services)),
        )
}
