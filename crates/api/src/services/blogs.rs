//! Blog authoring: turns create/update payloads into stored rows.
//!
//! Derived fields (slug, reading time, excerpt, SEO defaults, publish
//! timestamp) are computed here so handlers stay thin.

use chrono::{DateTime, Utc};
use domain::models::blog::{Blog, CreateBlogRequest, UpdateBlogRequest};
use domain::models::non_blank;
use domain::services::{derive_excerpt, generate_slug, reading_time_minutes, unique_slug};
use persistence::repositories::{BlogInput, BlogRepository};
use shared::validation::normalize_tags;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;

pub struct BlogService {
    repo: BlogRepository,
    max_content_length: usize,
}

impl BlogService {
    pub fn new(pool: PgPool, max_content_length: usize) -> Self {
        Self {
            repo: BlogRepository::new(pool),
            max_content_length,
        }
    }

    pub async fn create(&self, author_id: Uuid, request: CreateBlogRequest) -> Result<Blog, ApiError> {
        self.check_content_length(&request.content)?;

        let base = match non_blank(request.slug.clone()) {
            Some(slug) => slug,
            None => generate_slug(&request.title),
        };
        let slug = unique_slug(&self.repo, &base, None).await?;

        let input = new_blog_input(request, slug, Utc::now());
        let blog: Blog = self.repo.create(author_id, &input).await?.into();
        info!(blog_id = %blog.id, slug = %blog.slug, published = blog.published, "Blog created");
        Ok(blog)
    }

    pub async fn update(&self, id: Uuid, request: UpdateBlogRequest) -> Result<Blog, ApiError> {
        if let Some(content) = &request.content {
            self.check_content_length(content)?;
        }

        let existing: Blog = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Blog not found".to_string()))?
            .into();

        let slug = match slug_base_for_update(&existing, &request) {
            Some(base) => unique_slug(&self.repo, &base, Some(id)).await?,
            None => existing.slug.clone(),
        };

        let input = merge_blog_update(&existing, request, slug, Utc::now());
        let blog: Blog = self
            .repo
            .update(id, &input)
            .await?
            .ok_or_else(|| ApiError::NotFound("Blog not found".to_string()))?
            .into();
        info!(blog_id = %blog.id, slug = %blog.slug, published = blog.published, "Blog updated");
        Ok(blog)
    }

    fn check_content_length(&self, content: &str) -> Result<(), ApiError> {
        if content.len() > self.max_content_length {
            return Err(ApiError::validation(format!(
                "Content must be at most {} bytes",
                self.max_content_length
            )));
        }
        Ok(())
    }
}

/// Returns the slug base to allocate for an update, or `None` to keep the
/// current slug. An explicit slug wins; otherwise a changed title
/// regenerates it.
fn slug_base_for_update(existing: &Blog, request: &UpdateBlogRequest) -> Option<String> {
    if let Some(slug) = non_blank(request.slug.clone()) {
        return (slug != existing.slug).then_some(slug);
    }
    match request.title.as_deref().map(str::trim) {
        Some(title) if title != existing.title => Some(generate_slug(title)),
        _ => None,
    }
}

/// Publishing stamps the current time, unpublishing clears it and saving an
/// already published post keeps the original timestamp.
pub fn publish_timestamp(
    was_published: bool,
    previous: Option<DateTime<Utc>>,
    published: bool,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (was_published, published) {
        (_, false) => None,
        (true, true) => previous.or(Some(now)),
        (false, true) => Some(now),
    }
}

/// `None` keeps the current value, a blank string clears it.
fn patch_text(update: Option<String>, current: Option<String>) -> Option<String> {
    match update {
        Some(value) => non_blank(Some(value)),
        None => current,
    }
}

fn new_blog_input(request: CreateBlogRequest, slug: String, now: DateTime<Utc>) -> BlogInput {
    let title = request.title.trim().to_string();
    let excerpt = non_blank(request.excerpt).or_else(|| non_blank(Some(derive_excerpt(&request.content))));

    BlogInput {
        meta_title: non_blank(request.meta_title).or_else(|| Some(title.clone())),
        meta_description: non_blank(request.meta_description).or_else(|| excerpt.clone()),
        meta_keywords: normalize_tags(&request.meta_keywords),
        canonical_url: non_blank(request.canonical_url),
        og_image: non_blank(request.og_image),
        reading_time_minutes: reading_time_minutes(&request.content),
        published_at: publish_timestamp(false, None, request.published, now),
        tags: normalize_tags(&request.tags),
        cover_image: non_blank(request.cover_image),
        published: request.published,
        featured: request.featured,
        content: request.content,
        excerpt,
        title,
        slug,
    }
}

fn merge_blog_update(
    existing: &Blog,
    request: UpdateBlogRequest,
    slug: String,
    now: DateTime<Utc>,
) -> BlogInput {
    let title = request
        .title
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| existing.title.clone());
    let content = request.content.unwrap_or_else(|| existing.content.clone());
    let published = request.published.unwrap_or(existing.published);

    let excerpt = match request.excerpt {
        Some(excerpt) => non_blank(Some(excerpt)).or_else(|| non_blank(Some(derive_excerpt(&content)))),
        None => existing.excerpt.clone(),
    };

    let seo = &existing.seo;
    BlogInput {
        meta_title: patch_text(request.meta_title, seo.meta_title.clone()),
        meta_description: patch_text(request.meta_description, seo.meta_description.clone()),
        meta_keywords: request
            .meta_keywords
            .map(|k| normalize_tags(&k))
            .unwrap_or_else(|| seo.meta_keywords.clone()),
        canonical_url: patch_text(request.canonical_url, seo.canonical_url.clone()),
        og_image: patch_text(request.og_image, seo.og_image.clone()),
        reading_time_minutes: reading_time_minutes(&content),
        published_at: publish_timestamp(existing.published, existing.published_at, published, now),
        tags: request
            .tags
            .map(|t| normalize_tags(&t))
            .unwrap_or_else(|| existing.tags.clone()),
        cover_image: patch_text(request.cover_image, existing.cover_image.clone()),
        featured: request.featured.unwrap_or(existing.featured),
        published,
        excerpt,
        content,
        title,
        slug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::models::blog::SeoMetadata;

    fn create_request(title: &str, content: &str) -> CreateBlogRequest {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "content": content,
        }))
        .unwrap()
    }

    fn existing_blog() -> Blog {
        let created = Utc::now() - Duration::days(10);
        Blog {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: "Original Title".to_string(),
            slug: "original-title".to_string(),
            excerpt: Some("Original excerpt".to_string()),
            content: "word ".repeat(450),
            cover_image: Some("https://img.example.com/a.png".to_string()),
            tags: vec!["rust".to_string()],
            published: true,
            featured: false,
            published_at: Some(created),
            views: 10,
            claps: 3,
            reading_time_minutes: 3,
            seo: SeoMetadata {
                meta_title: Some("Original Title".to_string()),
                meta_description: Some("Original excerpt".to_string()),
                meta_keywords: vec![],
                canonical_url: None,
                og_image: None,
            },
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_publish_timestamp_transitions() {
        let now = Utc::now();
        let earlier = now - Duration::days(3);

        assert_eq!(publish_timestamp(false, None, true, now), Some(now));
        assert_eq!(publish_timestamp(true, Some(earlier), true, now), Some(earlier));
        assert_eq!(publish_timestamp(true, Some(earlier), false, now), None);
        assert_eq!(publish_timestamp(false, None, false, now), None);
        // legacy rows published without a timestamp get one on save
        assert_eq!(publish_timestamp(true, None, true, now), Some(now));
    }

    #[test]
    fn test_new_input_derives_defaults() {
        let now = Utc::now();
        let mut request = create_request("  Hello World  ", "# Heading\n\nSome **bold** text here.");
        request.tags = vec!["Rust".to_string(), "rust".to_string(), " Web ".to_string()];

        let input = new_blog_input(request, "hello-world".to_string(), now);

        assert_eq!(input.title, "Hello World");
        assert_eq!(input.slug, "hello-world");
        assert_eq!(input.reading_time_minutes, 1);
        assert_eq!(input.excerpt.as_deref(), Some("Heading Some bold text here."));
        assert_eq!(input.meta_title.as_deref(), Some("Hello World"));
        assert_eq!(input.meta_description, input.excerpt);
        assert_eq!(input.tags, vec!["rust".to_string(), "web".to_string()]);
        assert!(!input.published);
        assert!(input.published_at.is_none());
    }

    #[test]
    fn test_new_published_input_is_stamped() {
        let now = Utc::now();
        let mut request = create_request("Launch", "Live now");
        request.published = true;
        request.excerpt = Some("Custom summary".to_string());

        let input = new_blog_input(request, "launch".to_string(), now);

        assert_eq!(input.published_at, Some(now));
        assert_eq!(input.excerpt.as_deref(), Some("Custom summary"));
        assert_eq!(input.meta_description.as_deref(), Some("Custom summary"));
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let existing = existing_blog();
        let input = merge_blog_update(
            &existing,
            UpdateBlogRequest::default(),
            existing.slug.clone(),
            Utc::now(),
        );

        assert_eq!(input.title, existing.title);
        assert_eq!(input.content, existing.content);
        assert_eq!(input.tags, existing.tags);
        assert_eq!(input.cover_image, existing.cover_image);
        assert_eq!(input.published_at, existing.published_at);
        assert_eq!(input.reading_time_minutes, 3);
    }

    #[test]
    fn test_merge_blank_clears_optional_text() {
        let existing = existing_blog();
        let request = UpdateBlogRequest {
            cover_image: Some(String::new()),
            meta_title: Some("  ".to_string()),
            ..Default::default()
        };

        let input = merge_blog_update(&existing, request, existing.slug.clone(), Utc::now());

        assert!(input.cover_image.is_none());
        assert!(input.meta_title.is_none());
    }

    #[test]
    fn test_merge_unpublish_clears_timestamp() {
        let existing = existing_blog();
        let request = UpdateBlogRequest {
            published: Some(false),
            ..Default::default()
        };

        let input = merge_blog_update(&existing, request, existing.slug.clone(), Utc::now());

        assert!(!input.published);
        assert!(input.published_at.is_none());
    }

    #[test]
    fn test_merge_new_content_recomputes_reading_time() {
        let existing = existing_blog();
        let request = UpdateBlogRequest {
            content: Some("short".to_string()),
            ..Default::default()
        };

        let input = merge_blog_update(&existing, request, existing.slug.clone(), Utc::now());
        assert_eq!(input.reading_time_minutes, 1);
    }

    #[test]
    fn test_slug_base_for_update() {
        let existing = existing_blog();

        assert_eq!(slug_base_for_update(&existing, &UpdateBlogRequest::default()), None);

        let same_title = UpdateBlogRequest {
            title: Some("Original Title".to_string()),
            ..Default::default()
        };
        assert_eq!(slug_base_for_update(&existing, &same_title), None);

        let new_title = UpdateBlogRequest {
            title: Some("A Better Title".to_string()),
            ..Default::default()
        };
        assert_eq!(
            slug_base_for_update(&existing, &new_title).as_deref(),
            Some("a-better-title")
        );

        let explicit = UpdateBlogRequest {
            title: Some("A Better Title".to_string()),
            slug: Some("custom-slug".to_string()),
            ..Default::default()
        };
        assert_eq!(
            slug_base_for_update(&existing, &explicit).as_deref(),
            Some("custom-slug")
        );
    }
}
