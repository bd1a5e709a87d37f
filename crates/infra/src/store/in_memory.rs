use std::sync::RwLock;

use async_trait::async_trait;

use bloglist_core::{Blog, BlogChanges, BlogId, Entity, User, UserId};

use super::{BlogStore, StoreError, UserStore};

#[derive(Debug, Default)]
struct Collections {
    blogs: Vec<Blog>,
    users: Vec<User>,
}

/// In-memory document store for tests/dev.
///
/// Both collections sit behind one lock so cross-collection writes (blog
/// insert + owner list append) are atomic. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn position<T: Entity>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

#[async_trait]
impl BlogStore for InMemoryStore {
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.blogs.clone())
    }

    async fn get_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(position(&inner.blogs, &id).map(|i| inner.blogs[i].clone()))
    }

    async fn insert_blog(&self, blog: Blog) -> Result<Blog, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        if position(&inner.blogs, &blog.id).is_some() {
            return Err(StoreError::Conflict(format!("blog {}", blog.id)));
        }

        if let Some(owner) = blog.user {
            let idx = position(&inner.users, &owner)
                .ok_or_else(|| StoreError::MissingReference(format!("user {owner}")))?;
            inner.users[idx].blogs.push(blog.id);
        }

        inner.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn update_blog(&self, id: BlogId, changes: BlogChanges) -> Result<Option<Blog>, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let Some(idx) = position(&inner.blogs, &id) else {
            return Ok(None);
        };

        let blog = &mut inner.blogs[idx];
        blog.apply(changes);
        Ok(Some(blog.clone()))
    }

    async fn remove_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let Some(idx) = position(&inner.blogs, &id) else {
            return Ok(None);
        };

        let removed = inner.blogs.remove(idx);
        if let Some(owner) = removed.user {
            if let Some(u) = position(&inner.users, &owner) {
                inner.users[u].blogs.retain(|b| *b != id);
            }
        }
        Ok(Some(removed))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.users.clone())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(position(&inner.users, &id).map(|i| inner.users[i].clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;

        if inner.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!("username {}", user.username)));
        }

        inner.users.push(user.clone());
        Ok(user)
    }
}
