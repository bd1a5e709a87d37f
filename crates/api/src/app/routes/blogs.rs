use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    handler::Handler,
    http::StatusCode,
    routing::get,
};

use bloglist_core::{BlogChanges, BlogId, DomainError, NewBlog, stats};

use crate::app::dto::{self, BlogView, CreateBlogRequest, OwnerView, StatsView, UpdateBlogRequest};
use crate::app::errors::{ApiError, MALFORMATTED_ID};
use crate::app::routes::common::parse_id;
use crate::app::services::AppServices;
use crate::context::CallerContext;
use crate::middleware::{self, AuthState};

/// `/api/blogs`. Create and delete require a bearer token; list and update do not.
pub fn router(auth: AuthState) -> Router {
    let require_auth = axum::middleware::from_fn_with_state(auth, middleware::auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_blogs).post(create_blog.layer(require_auth.clone())),
        )
        .route(
            "/stats",
            get(blog_stats)
                .put(reserved_id)
                .delete(reserved_id.layer(require_auth.clone())),
        )
        .route(
            "/:id",
            axum::routing::put(update_blog).delete(delete_blog.layer(require_auth)),
        )
}

/// `stats` shadows `/:id` and can never parse as a blog id.
async fn reserved_id() -> ApiError {
    ApiError::validation(MALFORMATTED_ID)
}

pub async fn list_blogs(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<BlogView>>, ApiError> {
    let blogs = services.store.list_blogs().await?;
    let users = services.store.list_users().await?;
    Ok(Json(dto::blogs_with_owners(&blogs, &users)))
}

pub async fn create_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<CreateBlogRequest>,
) -> Result<Json<BlogView>, ApiError> {
    let new_blog = NewBlog::parse(body.title, body.author, body.url, body.likes)?;

    let blog = services
        .store
        .insert_blog(new_blog.into_blog(BlogId::new(), caller.user_id()))
        .await?;

    tracing::info!(blog_id = %blog.id, user_id = %caller.user_id(), "blog created");
    Ok(Json(BlogView::new(&blog, Some(OwnerView::from(&caller)))))
}

pub async fn delete_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: BlogId = parse_id(&id)?;

    let blog = services
        .store
        .get_blog(id)
        .await?
        .ok_or_else(DomainError::not_found)?;

    blog.ensure_owned_by(caller.user_id())?;

    services.store.remove_blog(id).await?;

    tracing::info!(blog_id = %id, user_id = %caller.user_id(), "blog deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Replace all editable fields. No ownership check, unlike delete.
pub async fn update_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBlogRequest>,
) -> Result<Json<BlogView>, ApiError> {
    let id: BlogId = parse_id(&id)?;
    let changes = BlogChanges::parse(body.title, body.author, body.url, body.likes)?;

    let blog = services
        .store
        .update_blog(id, changes)
        .await?
        .ok_or_else(DomainError::not_found)?;

    let owner = match blog.user {
        Some(owner_id) => services.store.get_user(owner_id).await?,
        None => None,
    };

    Ok(Json(BlogView::new(&blog, owner.as_ref().map(OwnerView::from))))
}

pub async fn blog_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<StatsView>, ApiError> {
    let blogs = services.store.list_blogs().await?;

    Ok(Json(StatsView {
        total_likes: stats::total_likes(&blogs),
        favourite: stats::favourite_blog(&blogs).map(|b| BlogView::new(b, None)),
        most_blogs: stats::most_blogs(&blogs),
        most_likes: stats::most_likes(&blogs),
    }))
}
