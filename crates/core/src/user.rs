//! User account entity and registration rules.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::{BlogId, UserId};

pub const USERNAME_MISSING: &str = "Username missing";
pub const USERNAME_NOT_UNIQUE: &str = "Username must be unique";
pub const USERNAME_TOO_SHORT: &str = "Username must be atleast 3 characters";
pub const PASSWORD_MISSING: &str = "Password missing";

/// Minimum username length, counted in characters.
pub const MIN_USERNAME_LEN: usize = 3;

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    /// bcrypt digest; the raw password is never stored.
    pub password_hash: String,
    pub adult: Option<bool>,
    /// Blogs created by this user, in creation order.
    pub blogs: Vec<BlogId>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Validated registration input (password still in the clear).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
    pub adult: Option<bool>,
}

impl NewUser {
    /// Apply the registration rules in order: presence, uniqueness, length.
    ///
    /// `username_taken` is the caller's lookup against existing users.
    pub fn parse(
        username: Option<String>,
        name: Option<String>,
        password: Option<String>,
        adult: Option<bool>,
        username_taken: bool,
    ) -> DomainResult<Self> {
        let username = username.ok_or_else(|| DomainError::validation(USERNAME_MISSING))?;

        if username_taken {
            return Err(DomainError::conflict(USERNAME_NOT_UNIQUE));
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(DomainError::validation(USERNAME_TOO_SHORT));
        }

        let password = password.ok_or_else(|| DomainError::validation(PASSWORD_MISSING))?;

        Ok(Self {
            username,
            name,
            password,
            adult,
        })
    }

    /// Build the stored user once the password has been hashed.
    pub fn into_user(self, id: UserId, password_hash: String) -> User {
        User {
            id,
            username: self.username,
            name: self.name,
            password_hash,
            adult: self.adult,
            blogs: Vec::new(),
        }
    }
}
