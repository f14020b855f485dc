//! Admin dashboard blog management.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::blog::{
    AdminBlogQuery, Blog, BlogResponse, BlogSummary, CreateBlogRequest, UpdateBlogRequest,
};
use domain::models::{BlogAnalytics, ListResponse};
use domain::services::{aggregate, filter_and_sort};
use persistence::repositories::BlogRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::services::BlogService;

fn blog_service(state: &AppState) -> BlogService {
    BlogService::new(state.pool.clone(), state.config.limits.max_content_length)
}

fn blog_not_found() -> ApiError {
    ApiError::NotFound("Blog not found".to_string())
}

async fn all_blogs(state: &AppState) -> Result<Vec<Blog>, ApiError> {
    let rows = BlogRepository::new(state.pool.clone()).list_all().await?;
    Ok(rows.into_iter().map(Blog::from).collect())
}

/// GET /api/admin/blogs
///
/// Loads every post, then filters and sorts in memory.
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<AdminBlogQuery>,
) -> Result<Json<ListResponse<BlogSummary>>, ApiError> {
    let blogs = filter_and_sort(all_blogs(&state).await?, &query);
    Ok(Json(ListResponse::new(
        blogs.into_iter().map(BlogSummary::from).collect(),
    )))
}

/// POST /api/admin/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogResponse>), ApiError> {
    request.validate()?;
    let blog = blog_service(&state).create(admin.user().id, request).await?;
    Ok((StatusCode::CREATED, Json(blog.into())))
}

/// GET /api/admin/blogs/:id
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogResponse>, ApiError> {
    let blog: Blog = BlogRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(blog_not_found)?
        .into();
    Ok(Json(blog.into()))
}

/// PUT /api/admin/blogs/:id
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, ApiError> {
    request.validate()?;
    let blog = blog_service(&state).update(id, request).await?;
    Ok(Json(blog.into()))
}

/// DELETE /api/admin/blogs/:id
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !BlogRepository::new(state.pool.clone()).delete(id).await? {
        return Err(blog_not_found());
    }
    info!(blog_id = %id, "Blog deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/blogs/:id/reset-metrics
pub async fn reset_metrics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogResponse>, ApiError> {
    let blog: Blog = BlogRepository::new(state.pool.clone())
        .reset_metrics(id)
        .await?
        .ok_or_else(blog_not_found)?
        .into();
    info!(blog_id = %id, "Blog metrics reset");
    Ok(Json(blog.into()))
}

/// GET /api/admin/analytics
pub async fn analytics(State(state): State<AppState>) -> Result<Json<BlogAnalytics>, ApiError> {
    let blogs = all_blogs(&state).await?;
    Ok(Json(aggregate(&blogs, Utc::now())))
}
