use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use bloglist_auth::{PasswordError, TokenError};
use bloglist_core::DomainError;
use bloglist_infra::StoreError;

pub const TOKEN_INVALID: &str = "token missing or invalid";
pub const LOGIN_FAILED: &str = "invalid username or password";
pub const MALFORMATTED_ID: &str = "Malformatted id";
pub const INVALID_USER: &str = "Invalid user";
pub const UNEXPECTED: &str = "Something went wrong...";

/// Request failure, mapped onto a status code and `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401: missing, malformed or expired token; unknown user; failed login.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// 400: bad input, unknown or malformed id, ownership mismatch.
    #[error("validation failed: {0}")]
    Validation(String),

    /// 500: anything a collaborator threw that the caller cannot fix.
    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Conflict(msg) => Self::Validation(msg),
            DomainError::InvalidId(_) | DomainError::NotFound => Self::validation(MALFORMATTED_ID),
            DomainError::Unauthorized => Self::validation(INVALID_USER),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Unexpected(err.into())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Unexpected(err.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encode(_) => Self::Unexpected(err.into()),
            _ => Self::authentication(TOKEN_INVALID),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Authentication(msg) => json_error(StatusCode::UNAUTHORIZED, msg),
            ApiError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
            ApiError::Unexpected(err) => {
                tracing::error!(error = ?err, "request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED)
            }
        }
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
