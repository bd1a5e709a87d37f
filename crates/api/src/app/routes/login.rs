use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::post};
use chrono::Utc;

use crate::app::dto::{LoginRequest, LoginResponse};
use crate::app::errors::{ApiError, LOGIN_FAILED};
use crate::app::routes::common::blocking;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(login))
}

/// Exchange username + password for a bearer token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return Err(ApiError::authentication(LOGIN_FAILED));
    };

    let user = services
        .store
        .find_user_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::authentication(LOGIN_FAILED))?;

    let hasher = services.hasher.clone();
    let hash = user.password_hash.clone();
    if !blocking(move || hasher.verify(&password, &hash)).await?? {
        return Err(ApiError::authentication(LOGIN_FAILED));
    }

    let token = services.tokens.issue(user.id, &user.username, Utc::now())?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
