use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::get};

use bloglist_core::user::USERNAME_NOT_UNIQUE;
use bloglist_core::{DomainError, NewUser, UserId};
use bloglist_infra::StoreError;

use crate::app::dto::{self, CreateUserRequest, UserView};
use crate::app::errors::ApiError;
use crate::app::routes::common::blocking;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(list_users).post(create_user))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    let username_taken = match body.username.as_deref() {
        Some(username) => services.store.find_user_by_username(username).await?.is_some(),
        None => false,
    };

    let new_user = NewUser::parse(body.username, body.name, body.password, body.adult, username_taken)?;

    let hasher = services.hasher.clone();
    let password = new_user.password.clone();
    let password_hash = blocking(move || hasher.hash(&password)).await??;

    let user = services
        .store
        .insert_user(new_user.into_user(UserId::new(), password_hash))
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration of the same name.
            StoreError::Conflict(_) => ApiError::from(DomainError::conflict(USERNAME_NOT_UNIQUE)),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, "user created");
    Ok(Json(UserView::new(&user, Vec::new())))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = services.store.list_users().await?;
    let blogs = services.store.list_blogs().await?;
    Ok(Json(dto::users_with_blogs(&users, &blogs)))
}
