//! Blog post domain model and payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A blog post with publish state, engagement counters and SEO metadata.
#[derive(Debug, Clone)]
pub struct Blog {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub claps: i64,
    pub reading_time_minutes: i32,
    pub seo: SeoMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn status(&self) -> BlogStatus {
        if self.published {
            BlogStatus::Published
        } else {
            BlogStatus::Draft
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Search-engine metadata attached to a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Vec<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
}

/// Publish state derived from the `published` flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Published,
    Draft,
}

/// Request payload for creating a post.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: String,

    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,

    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub content: String,

    #[validate(url(message = "Cover image must be a valid URL"))]
    pub cover_image: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tags: Vec<String>,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub featured: bool,

    #[validate(length(max = 200, message = "Meta title must be at most 200 characters"))]
    pub meta_title: Option<String>,

    #[validate(length(max = 320, message = "Meta description must be at most 320 characters"))]
    pub meta_description: Option<String>,

    #[serde(default)]
    pub meta_keywords: Vec<String>,

    #[validate(url(message = "Canonical URL must be a valid URL"))]
    pub canonical_url: Option<String>,

    #[validate(url(message = "OG image must be a valid URL"))]
    pub og_image: Option<String>,
}

/// Request payload for updating a post (partial update).
///
/// Blank strings clear optional text fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,

    #[validate(length(max = 500, message = "Excerpt must be at most 500 characters"))]
    pub excerpt: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub content: Option<String>,

    #[validate(custom(function = "shared::validation::validate_clearable_url"))]
    pub cover_image: Option<String>,

    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tags: Option<Vec<String>>,

    pub published: Option<bool>,

    pub featured: Option<bool>,

    #[validate(length(max = 200, message = "Meta title must be at most 200 characters"))]
    pub meta_title: Option<String>,

    #[validate(length(max = 320, message = "Meta description must be at most 320 characters"))]
    pub meta_description: Option<String>,

    pub meta_keywords: Option<Vec<String>>,

    #[validate(custom(function = "shared::validation::validate_clearable_url"))]
    pub canonical_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_clearable_url"))]
    pub og_image: Option<String>,
}

/// Full post representation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    pub published: bool,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub claps: i64,
    pub reading_time_minutes: i32,
    pub seo: SeoMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Blog> for BlogResponse {
    fn from(b: Blog) -> Self {
        Self {
            status: b.status(),
            id: b.id,
            author_id: b.author_id,
            title: b.title,
            slug: b.slug,
            excerpt: b.excerpt,
            content: b.content,
            cover_image: b.cover_image,
            tags: b.tags,
            published: b.published,
            featured: b.featured,
            published_at: b.published_at,
            views: b.views,
            claps: b.claps,
            reading_time_minutes: b.reading_time_minutes,
            seo: b.seo,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Post listing entry (no body).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub claps: i64,
    pub reading_time_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Blog> for BlogSummary {
    fn from(b: Blog) -> Self {
        Self {
            status: b.status(),
            id: b.id,
            title: b.title,
            slug: b.slug,
            excerpt: b.excerpt,
            cover_image: b.cover_image,
            tags: b.tags,
            featured: b.featured,
            published_at: b.published_at,
            views: b.views,
            claps: b.claps,
            reading_time_minutes: b.reading_time_minutes,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Default page size for the public listing.
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// Largest page size the public listing accepts.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Query parameters for the public post listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBlogQuery {
    pub tag: Option<String>,
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PublicBlogQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Page of published posts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPage {
    pub items: Vec<BlogSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Status filter for the admin dashboard listing.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
}

/// Sortable columns in the admin dashboard listing.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BlogSortField {
    CreatedAt,
    #[default]
    UpdatedAt,
    PublishedAt,
    Views,
    Claps,
    Title,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query parameters for the admin dashboard listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBlogQuery {
    #[serde(default)]
    pub status: StatusFilter,
    pub search: Option<String>,
    pub tag: Option<String>,
    #[serde(default)]
    pub sort: BlogSortField,
    #[serde(default)]
    pub order: SortOrder,
}

/// Request body for clapping a post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClapRequest {
    pub count: Option<i64>,
}

/// Response after a view is recorded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCountResponse {
    pub slug: String,
    pub views: i64,
}

/// Response after claps are recorded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClapCountResponse {
    pub slug: String,
    pub claps: i64,
    pub added: i64,
}

/// Tag usage among published posts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}
