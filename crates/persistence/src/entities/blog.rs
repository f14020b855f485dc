//! Blog entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::blog::SeoMetadata;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the blogs table. SEO columns are flat here and
/// grouped into [`SeoMetadata`] on conversion.
#[derive(Debug, Clone, FromRow)]
pub struct BlogEntity {
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
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Vec<String>,
    pub canonical_url: Option<String>,
    pub og_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogEntity> for domain::models::Blog {
    fn from(e: BlogEntity) -> Self {
        Self {
            id: e.id,
            author_id: e.author_id,
            title: e.title,
            slug: e.slug,
            excerpt: e.excerpt,
            content: e.content,
            cover_image: e.cover_image,
            tags: e.tags,
            published: e.published,
            featured: e.featured,
            published_at: e.published_at,
            views: e.views,
            claps: e.claps,
            reading_time_minutes: e.reading_time_minutes,
            seo: SeoMetadata {
                meta_title: e.meta_title,
                meta_description: e.meta_description,
                meta_keywords: e.meta_keywords,
                canonical_url: e.canonical_url,
                og_image: e.og_image,
            },
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Tag usage row from the published-tags aggregate query.
#[derive(Debug, Clone, FromRow)]
pub struct TagCountEntity {
    pub tag: String,
    pub count: i64,
}

impl From<TagCountEntity> for domain::models::blog::TagCount {
    fn from(e: TagCountEntity) -> Self {
        Self {
            tag: e.tag,
            count: e.count,
        }
    }
}
