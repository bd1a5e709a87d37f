//! Password hashing.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("stored password hash is unreadable: {0}")]
    CorruptHash(String),
}

/// One-way password digest. Each `hash` call uses a fresh salt.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub const DEFAULT_COST: u32 = 10;

    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::Hash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        bcrypt::verify(password, hash).map_err(|e| PasswordError::CorruptHash(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify() {
        let hasher = BcryptHasher::new(TEST_COST);
        let hash = hasher.hash("salainen").unwrap();

        assert_ne!(hash, "salainen");
        assert!(hasher.verify("salainen", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn salts_differ_per_hash() {
        let hasher = BcryptHasher::new(TEST_COST);
        assert_ne!(hasher.hash("salainen").unwrap(), hasher.hash("salainen").unwrap());
    }

    #[test]
    fn unreadable_hash_is_an_error() {
        let err = BcryptHasher::new(TEST_COST).verify("salainen", "plain-text").unwrap_err();
        assert!(matches!(err, PasswordError::CorruptHash(_)));
    }

    #[test]
    fn invalid_cost_fails_to_hash() {
        let err = BcryptHasher::new(1).hash("salainen").unwrap_err();
        assert!(matches!(err, PasswordError::Hash(_)));
    }
}
