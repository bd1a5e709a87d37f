//! HTTP API application wiring (Axum router + collaborator wiring).
//!
//! - `services.rs`: store, token codec and password hasher wiring
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request DTOs and response views
//! - `errors.rs`: error taxonomy and consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: AppServices) -> Router {
    let auth_state = services.auth_state();
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router(auth_state))
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
