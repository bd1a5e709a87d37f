//! Document store abstractions for the `blogs` and `users` collections.
//!
//! Handlers only see these traits; the in-memory store serves dev/test and
//! the Postgres store serves deployments with `DATABASE_URL` set.

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use bloglist_core::{Blog, BlogChanges, BlogId, User, UserId};

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Storage operation error.
///
/// These are infrastructure failures. Malformed identifiers never reach the
/// store: they are rejected when the path is parsed into a typed id.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("duplicate key: {0}")]
    Conflict(String),

    /// A write referenced a document that does not exist.
    #[error("referenced document missing: {0}")]
    MissingReference(String),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

/// The `blogs` collection.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// All blogs in creation order.
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError>;

    async fn get_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError>;

    /// Insert a blog and, when it has an owner, append its id to the owner's
    /// blog list. Both happen in one step.
    async fn insert_blog(&self, blog: Blog) -> Result<Blog, StoreError>;

    /// Apply `changes` to an existing blog. `None` when the blog is absent.
    async fn update_blog(&self, id: BlogId, changes: BlogChanges) -> Result<Option<Blog>, StoreError>;

    /// Remove a blog and drop it from its owner's list. Returns the removed blog.
    async fn remove_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError>;
}

/// The `users` collection.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users in creation order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user. Fails with [`StoreError::Conflict`] on a taken username.
    async fn insert_user(&self, user: User) -> Result<User, StoreError>;
}

/// Both collections behind one handle.
pub trait Store: BlogStore + UserStore {}

impl<S> Store for S where S: BlogStore + UserStore + ?Sized {}
