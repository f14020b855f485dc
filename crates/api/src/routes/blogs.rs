//! Public blog endpoints: listing, tag cloud, single post and the view/clap
//! counters.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::blog::{
    Blog, BlogPage, BlogResponse, ClapCountResponse, ClapRequest, PublicBlogQuery, TagCount,
    ViewCountResponse,
};
use domain::services::clamp_claps;
use persistence::repositories::{BlogRepository, PublishedBlogFilter};
use tracing::debug;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OptionalCurrentUser;
use crate::middleware::metrics::{record_blog_claps, record_blog_view};

fn blog_not_found() -> ApiError {
    ApiError::NotFound("Blog not found".to_string())
}

/// GET /api/blogs
///
/// Published posts only, newest first, paginated by `limit`/`offset`.
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<PublicBlogQuery>,
) -> Result<Json<BlogPage>, ApiError> {
    let repo = BlogRepository::new(state.pool.clone());
    let filter = PublishedBlogFilter {
        tag: query.tag.clone(),
        search: query.search.clone(),
        featured: query.featured,
    };
    let (limit, offset) = (query.limit(), query.offset());

    let items = repo.list_published(&filter, limit, offset).await?;
    let total = repo.count_published(&filter).await?;

    Ok(Json(BlogPage {
        items: items.into_iter().map(|e| Blog::from(e).into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// GET /api/blogs/tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagCount>>, ApiError> {
    let tags = BlogRepository::new(state.pool.clone())
        .published_tags()
        .await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

/// GET /api/blogs/:slug
///
/// Drafts are visible only to admin sessions.
pub async fn get_blog(
    State(state): State<AppState>,
    viewer: OptionalCurrentUser,
    Path(slug): Path<String>,
) -> Result<Json<BlogResponse>, ApiError> {
    let blog: Blog = BlogRepository::new(state.pool.clone())
        .find_by_slug(&slug)
        .await?
        .ok_or_else(blog_not_found)?
        .into();

    if !blog.published && !viewer.is_admin() {
        debug!(slug = %slug, "Draft requested without admin session");
        return Err(blog_not_found());
    }
    Ok(Json(blog.into()))
}

/// POST /api/blogs/:slug/view
pub async fn record_view(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ViewCountResponse>, ApiError> {
    let views = BlogRepository::new(state.pool.clone())
        .increment_views(&slug)
        .await?
        .ok_or_else(blog_not_found)?;
    record_blog_view();

    Ok(Json(ViewCountResponse { slug, views }))
}

/// POST /api/blogs/:slug/clap
///
/// Adds between 1 and `limits.max_claps_per_request` claps; a missing body
/// or count adds one.
pub async fn clap(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Option<Json<ClapRequest>>,
) -> Result<Json<ClapCountResponse>, ApiError> {
    let requested = body.and_then(|Json(b)| b.count);
    let added = clamp_claps(requested, state.config.limits.max_claps_per_request);

    let claps = BlogRepository::new(state.pool.clone())
        .add_claps(&slug, added)
        .await?
        .ok_or_else(blog_not_found)?;
    record_blog_claps(added);

    Ok(Json(ClapCountResponse { slug, claps, added }))
}
