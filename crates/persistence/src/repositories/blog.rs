//! Blog repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::services::SlugStore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{BlogEntity, TagCountEntity};
use crate::metrics::QueryTimer;

const BLOG_COLUMNS: &str = r#"
    id, author_id, title, slug, excerpt, content, cover_image, tags, published, featured,
    published_at, views, claps, reading_time_minutes, meta_title, meta_description,
    meta_keywords, canonical_url, og_image, created_at, updated_at
"#;

/// Complete column set for inserting or rewriting a post.
#[derive(Debug, Clone)]
pub struct BlogInput {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub cover_image: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub featured: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub reading_time_minutes: i32,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Vec<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
}

/// Filters for the public published-post listing.
#[derive(Debug, Clone, Default)]
pub struct PublishedBlogFilter {
    pub tag: Option<String>,
    pub search: Option<String>,
    pub featured: Option<bool>,
}

impl PublishedBlogFilter {
    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern)
    }

    fn tag(&self) -> Option<String> {
        self.tag
            .as_deref()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
    }
}

/// Wraps user text as a substring ILIKE pattern with wildcards escaped.
fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Repository for blog posts and their engagement counters.
#[derive(Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    /// Creates a new BlogRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check whether a slug is used by any post other than `exclude_id`.
    pub async fn slug_exists(
        &self,
        slug: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("blog_slug_exists");
        let result: Result<(bool,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM blogs
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(|(exists,)| exists)
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        input: &BlogInput,
    ) -> Result<BlogEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_blog");
        let result = sqlx::query_as::<_, BlogEntity>(&format!(
            r#"
            INSERT INTO blogs (
                author_id, title, slug, excerpt, content, cover_image, tags, published,
                featured, published_at, reading_time_minutes, meta_title, meta_description,
                meta_keywords, canonical_url, og_image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(author_id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.cover_image)
        .bind(&input.tags)
        .bind(input.published)
        .bind(input.featured)
        .bind(input.published_at)
        .bind(input.reading_time_minutes)
        .bind(&input.meta_title)
        .bind(&input.meta_description)
        .bind(&input.meta_keywords)
        .bind(&input.canonical_url)
        .bind(&input.og_image)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rewrite every editable column of a post. Counters are untouched.
    pub async fn update(
        &self,
        id: Uuid,
        input: &BlogInput,
    ) -> Result<Option<BlogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_blog");
        let result = sqlx::query_as::<_, BlogEntity>(&format!(
            r#"
            UPDATE blogs SET
                title = $2,
                slug = $3,
                excerpt = $4,
                content = $5,
                cover_image = $6,
                tags = $7,
                published = $8,
                featured = $9,
                published_at = $10,
                reading_time_minutes = $11,
                meta_title = $12,
                meta_description = $13,
                meta_keywords = $14,
                canonical_url = $15,
                og_image = $16,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.slug)
        .bind(&input.excerpt)
        .bind(&input.content)
        .bind(&input.cover_image)
        .bind(&input.tags)
        .bind(input.published)
        .bind(input.featured)
        .bind(input.published_at)
        .bind(input.reading_time_minutes)
        .bind(&input.meta_title)
        .bind(&input.meta_description)
        .bind(&input.meta_keywords)
        .bind(&input.canonical_url)
        .bind(&input.og_image)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_blog_by_id");
        let result = sqlx::query_as::<_, BlogEntity>(&format!(
            "SELECT {} FROM blogs WHERE id = $1",
            BLOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a post by slug regardless of publish state.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_blog_by_slug");
        let result = sqlx::query_as::<_, BlogEntity>(&format!(
            "SELECT {} FROM blogs WHERE slug = $1",
            BLOG_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch every post for dashboard views and analytics.
    pub async fn list_all(&self) -> Result<Vec<BlogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_blogs");
        let result = sqlx::query_as::<_, BlogEntity>(&format!(
            "SELECT {} FROM blogs ORDER BY updated_at DESC",
            BLOG_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Page of published posts, newest publication first.
    pub async fn list_published(
        &self,
        filter: &PublishedBlogFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_published_blogs");
        let result = sqlx::query_as::<_, BlogEntity>(&format!(
            r#"
            SELECT {} FROM blogs
            WHERE published = true
              AND ($1::text IS NULL OR $1 = ANY(tags))
              AND ($2::text IS NULL OR title ILIKE $2 OR excerpt ILIKE $2)
              AND ($3::boolean IS NULL OR featured = $3)
            ORDER BY published_at DESC NULLS LAST, created_at DESC
            LIMIT $4 OFFSET $5
            "#,
            BLOG_COLUMNS
        ))
        .bind(filter.tag())
        .bind(filter.search_pattern())
        .bind(filter.featured)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count published posts matching the same filter as [`Self::list_published`].
    pub async fn count_published(&self, filter: &PublishedBlogFilter) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_published_blogs");
        let result: Result<(i64,), sqlx::Error> = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM blogs
            WHERE published = true
              AND ($1::text IS NULL OR $1 = ANY(tags))
              AND ($2::text IS NULL OR title ILIKE $2 OR excerpt ILIKE $2)
              AND ($3::boolean IS NULL OR featured = $3)
            "#,
        )
        .bind(filter.tag())
        .bind(filter.search_pattern())
        .bind(filter.featured)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result.map(|(count,)| count)
    }

    /// Distinct tags across published posts with usage counts.
    pub async fn published_tags(&self) -> Result<Vec<TagCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("published_blog_tags");
        let result = sqlx::query_as::<_, TagCountEntity>(
            r#"
            SELECT tag, COUNT(*) AS count
            FROM blogs, UNNEST(tags) AS tag
            WHERE published = true
            GROUP BY tag
            ORDER BY count DESC, tag ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Atomically add one view to a published post; returns the new count.
    pub async fn increment_views(&self, slug: &str) -> Result<Option<i64>, sqlx::Error> {
        let timer = QueryTimer::new("increment_blog_views");
        let result: Result<Option<(i64,)>, sqlx::Error> = sqlx::query_as(
            r#"
            UPDATE blogs SET views = views + 1
            WHERE slug = $1 AND published = true
            RETURNING views
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(|(views,)| views))
    }

    /// Atomically add claps to a published post; returns the new total.
    pub async fn add_claps(&self, slug: &str, count: i64) -> Result<Option<i64>, sqlx::Error> {
        let timer = QueryTimer::new("add_blog_claps");
        let result: Result<Option<(i64,)>, sqlx::Error> = sqlx::query_as(
            r#"
            UPDATE blogs SET claps = claps + $2
            WHERE slug = $1 AND published = true
            RETURNING claps
            "#,
        )
        .bind(slug)
        .bind(count)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result.map(|row| row.map(|(claps,)| claps))
    }

    /// Zero the view and clap counters of a post.
    pub async fn reset_metrics(&self, id: Uuid) -> Result<Option<BlogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("reset_blog_metrics");
        let result = sqlx::query_as::<_, BlogEntity>(&format!(
            r#"
            UPDATE blogs SET views = 0, claps = 0, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BLOG_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_blog");
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SlugStore for BlogRepository {
    type Error = sqlx::Error;

    async fn slug_taken(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, sqlx::Error> {
        self.slug_exists(slug, exclude_id).await
    }
}
