use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use bloglist_auth::JwtValidator;
use bloglist_infra::Store;

use crate::app::errors::{ApiError, TOKEN_INVALID};
use crate::context::CallerContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
    pub store: Arc<dyn Store>,
}

/// Require `Authorization: bearer <token>` naming an existing user.
///
/// On success the handler sees a [`CallerContext`] extension.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!("rejected bearer token: {e}");
        ApiError::authentication(TOKEN_INVALID)
    })?;

    let user = state
        .store
        .get_user(claims.id)
        .await?
        .ok_or_else(|| ApiError::authentication(TOKEN_INVALID))?;

    req.extensions_mut().insert(CallerContext::from(&user));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let invalid = || ApiError::authentication(TOKEN_INVALID);

    let header = headers.get(AUTHORIZATION).ok_or_else(invalid)?;
    let header = header.to_str().map_err(|_| invalid())?;

    let (scheme, token) = header.split_once(' ').ok_or_else(invalid)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(invalid());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(invalid());
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(extract_bearer(&headers("bearer abc")).unwrap(), "abc");
        assert_eq!(extract_bearer(&headers("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn rejects_missing_or_foreign_credentials() {
        assert!(extract_bearer(&HeaderMap::new()).is_err());
        assert!(extract_bearer(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_bearer(&headers("bearer    ")).is_err());
        assert!(extract_bearer(&headers("bearer")).is_err());
    }
}
