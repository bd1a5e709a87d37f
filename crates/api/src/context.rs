use bloglist_core::{User, UserId};

/// Authenticated caller for a request.
///
/// Inserted by the auth middleware once the bearer token has been verified
/// and resolved to an existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    user_id: UserId,
    username: String,
    name: Option<String>,
}

impl CallerContext {
    pub fn new(user_id: UserId, username: impl Into<String>, name: Option<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            name,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl From<&User> for CallerContext {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.username.clone(), user.name.clone())
    }
}
