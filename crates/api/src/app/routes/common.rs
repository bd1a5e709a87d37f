use core::str::FromStr;

use bloglist_core::DomainError;

use crate::app::errors::{ApiError, MALFORMATTED_ID};

/// Parse a path segment into a typed id; malformed ids are client errors.
pub fn parse_id<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse().map_err(|e: DomainError| {
        tracing::debug!("{e}");
        ApiError::validation(MALFORMATTED_ID)
    })
}

/// Run CPU-heavy work (password hashing) off the async worker threads.
pub async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Unexpected(e.into()))
}
