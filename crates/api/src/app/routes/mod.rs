use axum::Router;

pub mod blogs;
pub mod common;
pub mod login;
pub mod system;
pub mod users;

use crate::middleware::AuthState;

/// Router for everything under `/api`. Per-route authentication is applied
/// inside each resource router.
pub fn router(auth: AuthState) -> Router {
    Router::new()
        .nest("/blogs", blogs::router(auth))
        .nest("/users", users::router())
        .nest("/login", login::router())
}
