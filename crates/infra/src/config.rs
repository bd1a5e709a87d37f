//! Configuration loading and representation.

use chrono::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3003;
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEV_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Process configuration, read from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `PORT`
    pub port: u16,
    /// `SECRET`: HS256 signing key.
    pub secret: String,
    /// `DATABASE_URL`: Postgres store when set, in-memory store otherwise.
    pub database_url: Option<String>,
    /// `TOKEN_TTL_SECS`
    pub token_ttl: Duration,
    /// `BCRYPT_COST`
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup (tests pass a map instead of the environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(&lookup, "PORT", "a port number", DEFAULT_PORT)?;

        let secret = lookup("SECRET").filter(|s| !s.is_empty()).unwrap_or_else(|| {
            tracing::warn!("SECRET not set; using insecure dev default");
            DEV_SECRET.to_string()
        });

        let database_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());

        let ttl_secs: i64 = parse_or(&lookup, "TOKEN_TTL_SECS", "a positive number of seconds", DEFAULT_TOKEN_TTL_SECS)?;
        if ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_SECS",
                expected: "a positive number of seconds",
                value: ttl_secs.to_string(),
            });
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", "an integer between 4 and 31", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                expected: "an integer between 4 and 31",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            port,
            secret,
            database_url,
            token_ttl: Duration::seconds(ttl_secs),
            bcrypt_cost,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.port, 3003);
        assert_eq!(cfg.secret, "dev-secret");
        assert_eq!(cfg.database_url, None);
        assert_eq!(cfg.token_ttl, Duration::hours(1));
        assert_eq!(cfg.bcrypt_cost, 10);
    }

    #[test]
    fn explicit_values() {
        let cfg = load(&[
            ("PORT", "8080"),
            ("SECRET", "s3cr3t"),
            ("DATABASE_URL", "postgres://localhost/bloglist"),
            ("TOKEN_TTL_SECS", "60"),
            ("BCRYPT_COST", "4"),
        ])
        .unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.secret, "s3cr3t");
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/bloglist"));
        assert_eq!(cfg.token_ttl, Duration::seconds(60));
        assert_eq!(cfg.bcrypt_cost, 4);
    }

    #[test]
    fn empty_database_url_means_in_memory() {
        assert_eq!(load(&[("DATABASE_URL", "")]).unwrap().database_url, None);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(matches!(load(&[("PORT", "http")]), Err(ConfigError::Invalid { key: "PORT", .. })));
        assert!(matches!(load(&[("TOKEN_TTL_SECS", "0")]), Err(ConfigError::Invalid { key: "TOKEN_TTL_SECS", .. })));
        assert!(matches!(load(&[("BCRYPT_COST", "40")]), Err(ConfigError::Invalid { key: "BCRYPT_COST", .. })));
    }
}
