//! `bloglist-auth`: bearer tokens and password digests.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::{TokenClaims, TokenError, validate_claims};
pub use jwt::{Hs256Jwt, JwtIssuer, JwtValidator};
pub use password::{BcryptHasher, PasswordError, PasswordHasher};
