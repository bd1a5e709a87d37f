//! HS256 token codec.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use bloglist_core::UserId;

use crate::claims::{TokenClaims, TokenError, validate_claims};

/// Verifies bearer tokens and yields their claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError>;
}

/// Issues bearer tokens for authenticated users.
pub trait JwtIssuer: Send + Sync {
    fn issue(&self, user_id: UserId, username: &str, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// Shared-secret HS256 signer/verifier.
#[derive(Clone)]
pub struct Hs256Jwt {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Hs256Jwt {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // The time window is checked against the caller's clock in `validate_claims`.
        validation.validate_exp = false;
        validation
    }
}

impl JwtValidator for Hs256Jwt {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &Self::validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::MissingRequiredClaim(_) => TokenError::Malformed,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

impl JwtIssuer for Hs256Jwt {
    fn issue(&self, user_id: UserId, username: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims::new(user_id, username, now, self.ttl);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str) -> Hs256Jwt {
        Hs256Jwt::new(secret, Duration::hours(1))
    }

    #[test]
    fn issued_token_validates() {
        let jwt = codec("test-secret");
        let user_id = UserId::new();
        let now = Utc::now();

        let token = jwt.issue(user_id, "mluukkai", now).unwrap();
        let claims = jwt.validate(&token, now).unwrap();

        assert_eq!(claims.id, user_id);
        assert_eq!(claims.username, "mluukkai");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let now = Utc::now();
        let token = codec("one").issue(UserId::new(), "mluukkai", now).unwrap();
        let err = codec("two").validate(&token, now).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = codec("test-secret").validate("not-a-token", Utc::now()).unwrap_err();
        assert_eq!(err, TokenError::Malformed);
    }

    #[test]
    fn token_expires_after_ttl() {
        let jwt = codec("test-secret");
        let issued = Utc::now();
        let token = jwt.issue(UserId::new(), "mluukkai", issued).unwrap();

        let err = jwt.validate(&token, issued + Duration::hours(2)).unwrap_err();
        assert_eq!(err, TokenError::Expired);
    }
}
