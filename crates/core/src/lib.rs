//! `bloglist-core`: domain building blocks for blogs and user accounts.
//!
//! This crate contains **pure domain** code: identifiers, entities, the rules
//! applied on create/update, and list statistics. No IO.

pub mod blog;
pub mod entity;
pub mod error;
pub mod id;
pub mod stats;
pub mod user;

pub use blog::{Blog, BlogChanges, NewBlog};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{BlogId, UserId};
pub use user::{NewUser, User};
