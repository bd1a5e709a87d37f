use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bloglist_core::stats::{AuthorBlogs, AuthorLikes};
use bloglist_core::{Blog, BlogId, User, UserId};

use crate::context::CallerContext;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub adult: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// -------------------------
// Response views
// -------------------------

/// Owner summary embedded in a formatted blog.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerView {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
}

impl From<&User> for OwnerView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

impl From<&CallerContext> for OwnerView {
    fn from(caller: &CallerContext) -> Self {
        Self {
            id: caller.user_id(),
            username: caller.username().to_string(),
            name: caller.name().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogView {
    pub id: BlogId,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<OwnerView>,
}

impl BlogView {
    pub fn new(blog: &Blog, owner: Option<OwnerView>) -> Self {
        Self {
            id: blog.id,
            title: blog.title.clone(),
            author: blog.author.clone(),
            url: blog.url.clone(),
            likes: blog.likes,
            user: owner,
        }
    }
}

/// Formatted user. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub adult: Option<bool>,
    pub blogs: Vec<BlogView>,
}

impl UserView {
    pub fn new(user: &User, blogs: Vec<BlogView>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            adult: user.adult,
            blogs,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsView {
    pub total_likes: u64,
    pub favourite: Option<BlogView>,
    pub most_blogs: Option<AuthorBlogs>,
    pub most_likes: Option<AuthorLikes>,
}

// -------------------------
// Join helpers
// -------------------------

/// Format every blog with its owner resolved from `users`.
pub fn blogs_with_owners(blogs: &[Blog], users: &[User]) -> Vec<BlogView> {
    let by_id: HashMap<UserId, &User> = users.iter().map(|u| (u.id, u)).collect();
    blogs
        .iter()
        .map(|blog| {
            let owner = blog.user.and_then(|id| by_id.get(&id)).map(|u| OwnerView::from(*u));
            BlogView::new(blog, owner)
        })
        .collect()
}

/// Format every user with the blogs from its list, in list order.
pub fn users_with_blogs(users: &[User], blogs: &[Blog]) -> Vec<UserView> {
    let by_id: HashMap<BlogId, &Blog> = blogs.iter().map(|b| (b.id, b)).collect();
    users
        .iter()
        .map(|user| {
            let owned = user
                .blogs
                .iter()
                .filter_map(|id| by_id.get(id))
                .map(|blog| BlogView::new(blog, None))
                .collect();
            UserView::new(user, owned)
        })
        .collect()
}
