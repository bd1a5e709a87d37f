//! Collaborator wiring: document store, token codec, password hasher.

use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;

use bloglist_auth::{BcryptHasher, Hs256Jwt, JwtIssuer, JwtValidator, PasswordHasher};
use bloglist_infra::{AppConfig, InMemoryStore, PostgresStore, Store};

use crate::middleware::AuthState;

/// Everything a handler may call out to. Cheap to clone.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<dyn JwtIssuer>,
    pub validator: Arc<dyn JwtValidator>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl AppServices {
    pub fn new(store: Arc<dyn Store>, jwt: Arc<Hs256Jwt>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            store,
            tokens: jwt.clone(),
            validator: jwt,
            hasher,
        }
    }

    /// In-memory wiring for dev/test.
    pub fn in_memory(secret: &str, token_ttl: Duration, bcrypt_cost: u32) -> Self {
        Self::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(Hs256Jwt::new(secret, token_ttl)),
            Arc::new(BcryptHasher::new(bcrypt_cost)),
        )
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState {
            jwt: self.validator.clone(),
            store: self.store.clone(),
        }
    }
}

/// Build services from configuration: Postgres when `DATABASE_URL` is set,
/// in-memory otherwise.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let pg = PostgresStore::connect(url)
                .await
                .context("failed to connect to Postgres")?;
            pg.migrate().await.context("failed to apply schema")?;
            tracing::info!("using Postgres store");
            Arc::new(pg)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on exit)");
            Arc::new(InMemoryStore::new())
        }
    };

    Ok(AppServices::new(
        store,
        Arc::new(Hs256Jwt::new(&config.secret, config.token_ttl)),
        Arc::new(BcryptHasher::new(config.bcrypt_cost)),
    ))
}
