//! Postgres-backed document store.
//!
//! ## Owned blog lists
//!
//! A user's blog list is not stored redundantly: it is derived from
//! `blogs.user_id` ordered by creation time. Creating a blog is therefore a
//! single insert and the blog/owner cross-reference can never diverge.
//!
//! ## Error Mapping
//!
//! | PostgreSQL Error Code | StoreError | Scenario |
//! |----------------------|------------|----------|
//! | `23505` | `Conflict` | duplicate username or id |
//! | `23503` | `MissingReference` | blog owner does not exist |
//! | anything else | `Database` | connection failures, check constraints, etc. |

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{FromRow, Row};
use tracing::instrument;
use uuid::Uuid;

use bloglist_core::{Blog, BlogChanges, BlogId, User, UserId};

use super::{BlogStore, StoreError, UserStore};

const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

const BLOG_COLUMNS: &str = "id, title, author, url, likes, user_id";
const USER_COLUMNS: &str = "id, username, name, password_hash, adult";

/// Postgres document store.
///
/// Uses the SQLx connection pool, which is `Send + Sync` and cheap to share.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Arc<PgPool>,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a connection pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create tables and indexes if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }

    async fn owned_blog_ids(&self, user_id: UserId) -> Result<Vec<BlogId>, StoreError> {
        let rows = sqlx::query("SELECT id FROM blogs WHERE user_id = $1 ORDER BY created_at, id")
            .bind(user_id.as_uuid())
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("owned_blog_ids", e))?;

        rows.iter()
            .map(|row| row.try_get::<Uuid, _>("id").map(BlogId::from_uuid))
            .collect::<Result<_, _>>()
            .map_err(|e| map_sqlx_error("owned_blog_ids", e))
    }

    async fn with_blogs(&self, row: Option<UserRow>) -> Result<Option<User>, StoreError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let blogs = self.owned_blog_ids(UserId::from_uuid(row.id)).await?;
        Ok(Some(row.into_user(blogs)))
    }
}

#[async_trait]
impl BlogStore for PostgresStore {
    #[instrument(skip(self), err)]
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let rows: Vec<BlogRow> = sqlx::query_as(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY created_at, id"
        ))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_blogs", e))?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    #[instrument(skip(self), fields(blog_id = %id), err)]
    async fn get_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError> {
        let row: Option<BlogRow> = sqlx::query_as(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_blog", e))?;

        Ok(row.map(Blog::from))
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id), err)]
    async fn insert_blog(&self, blog: Blog) -> Result<Blog, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO blogs (id, title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(blog.id.as_uuid())
        .bind(&blog.title)
        .bind(&blog.author)
        .bind(&blog.url)
        .bind(blog.likes as i64)
        .bind(blog.user.map(Uuid::from))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_blog", e))?;

        Ok(blog)
    }

    #[instrument(skip(self, changes), fields(blog_id = %id), err)]
    async fn update_blog(&self, id: BlogId, changes: BlogChanges) -> Result<Option<Blog>, StoreError> {
        let row: Option<BlogRow> = sqlx::query_as(&format!(
            r#"
            UPDATE blogs
            SET title = $2, author = $3, url = $4, likes = $5
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(changes.title)
        .bind(changes.author)
        .bind(changes.url)
        .bind(changes.likes as i64)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_blog", e))?;

        Ok(row.map(Blog::from))
    }

    #[instrument(skip(self), fields(blog_id = %id), err)]
    async fn remove_blog(&self, id: BlogId) -> Result<Option<Blog>, StoreError> {
        let row: Option<BlogRow> = sqlx::query_as(&format!("DELETE FROM blogs WHERE id = $1 RETURNING {BLOG_COLUMNS}"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("remove_blog", e))?;

        Ok(row.map(Blog::from))
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    #[instrument(skip(self), err)]
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id"
        ))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_users", e))?;

        let owned = sqlx::query(
            "SELECT id, user_id FROM blogs WHERE user_id IS NOT NULL ORDER BY created_at, id",
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_users", e))?;

        let mut by_owner: HashMap<Uuid, Vec<BlogId>> = HashMap::new();
        for row in owned {
            let blog_id: Uuid = row.try_get("id").map_err(|e| map_sqlx_error("list_users", e))?;
            let user_id: Uuid = row.try_get("user_id").map_err(|e| map_sqlx_error("list_users", e))?;
            by_owner.entry(user_id).or_default().push(BlogId::from_uuid(blog_id));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let blogs = by_owner.remove(&row.id).unwrap_or_default();
                row.into_user(blogs)
            })
            .collect())
    }

    #[instrument(skip(self), fields(user_id = %id), err)]
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_user", e))?;

        self.with_blogs(row).await
    }

    #[instrument(skip(self), err)]
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1"))
            .bind(username)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_user_by_username", e))?;

        self.with_blogs(row).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id), err)]
    async fn insert_user(&self, user: User) -> Result<User, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, name, password_hash, adult)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.adult)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_user", e))?;

        Ok(user)
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message().to_string();
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Conflict(format!("{operation}: {message}")),
                Some("23503") => StoreError::MissingReference(format!("{operation}: {message}")),
                _ => StoreError::Database { operation, message },
            }
        }
        other => StoreError::Database {
            operation,
            message: other.to_string(),
        },
    }
}

// SQLx row types

#[derive(Debug)]
struct BlogRow {
    id: Uuid,
    title: String,
    author: Option<String>,
    url: String,
    likes: i64,
    user_id: Option<Uuid>,
}

impl<'r> FromRow<'r, PgRow> for BlogRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(BlogRow {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            url: row.try_get("url")?,
            likes: row.try_get("likes")?,
            user_id: row.try_get("user_id")?,
        })
    }
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        Blog {
            id: BlogId::from_uuid(row.id),
            title: row.title,
            author: row.author,
            url: row.url,
            likes: row.likes.max(0) as u64,
            user: row.user_id.map(UserId::from_uuid),
        }
    }
}

#[derive(Debug)]
struct UserRow {
    id: Uuid,
    username: String,
    name: Option<String>,
    password_hash: String,
    adult: Option<bool>,
}

impl<'r> FromRow<'r, PgRow> for UserRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(UserRow {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            name: row.try_get("name")?,
            password_hash: row.try_get("password_hash")?,
            adult: row.try_get("adult")?,
        })
    }
}

impl UserRow {
    fn into_user(self, blogs: Vec<BlogId>) -> User {
        User {
            id: UserId::from_uuid(self.id),
            username: self.username,
            name: self.name,
            password_hash: self.password_hash,
            adult: self.adult,
            blogs,
        }
    }
}
