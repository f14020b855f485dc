//! In-memory filtering and sorting for the admin blog dashboard.

use std::cmp::Ordering;

use crate::models::blog::{AdminBlogQuery, Blog, BlogSortField, SortOrder, StatusFilter};

/// Applies the dashboard status/tag/search filters and sort to a fetched list.
///
/// Sorting is stable, so posts that compare equal keep their fetched order.
pub fn filter_and_sort(blogs: Vec<Blog>, query: &AdminBlogQuery) -> Vec<Blog> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let tag = query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let mut filtered: Vec<Blog> = blogs
        .into_iter()
        .filter(|b| matches_status(b, query.status))
        .filter(|b| tag.map_or(true, |t| b.has_tag(t)))
        .filter(|b| search.as_deref().map_or(true, |s| matches_search(b, s)))
        .collect();

    filtered.sort_by(|a, b| {
        let ord = compare(a, b, query.sort);
        match query.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    filtered
}

fn matches_status(blog: &Blog, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Published => blog.published,
        StatusFilter::Draft => !blog.published,
    }
}

/// `needle` must already be lower-cased.
fn matches_search(blog: &Blog, needle: &str) -> bool {
    blog.title.to_lowercase().contains(needle)
        || blog.slug.contains(needle)
        || blog
            .excerpt
            .as_deref()
            .is_some_and(|e| e.to_lowercase().contains(needle))
}

fn compare(a: &Blog, b: &Blog, field: BlogSortField) -> Ordering {
    match field {
        BlogSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        BlogSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        // unpublished posts sort as oldest
        BlogSortField::PublishedAt => a.published_at.cmp(&b.published_at),
        BlogSortField::Views => a.views.cmp(&b.views),
        BlogSortField::Claps => a.claps.cmp(&b.claps),
        BlogSortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blog::SeoMetadata;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn blog(title: &str, published: bool, views: i64, age_days: i64, tags: &[&str]) -> Blog {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let created = base - Duration::days(age_days);
        Blog {
            id: Uuid::new_v4(),
            author_id: Uuid::nil(),
            title: title.to_string(),
            slug: crate::services::slug::generate_slug(title),
            excerpt: Some(format!("About {}", title)),
            content: "body".to_string(),
            cover_image: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            published,
            featured: false,
            published_at: published.then_some(created),
            views,
            claps: views / 2,
            reading_time_minutes: 1,
            seo: SeoMetadata::default(),
            created_at: created,
            updated_at: created,
        }
    }

    fn sample() -> Vec<Blog> {
        vec![
            blog("Rust Ownership", true, 100, 10, &["rust"]),
            blog("Draft Ideas", false, 0, 1, &["misc"]),
            blog("Async Rust", true, 300, 5, &["rust", "async"]),
            blog("CSS Tricks", true, 50, 30, &["css"]),
        ]
    }

    fn titles(blogs: &[Blog]) -> Vec<&str> {
        blogs.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_default_is_all_by_updated_desc() {
        let result = filter_and_sort(sample(), &AdminBlogQuery::default());
        assert_eq!(
            titles(&result),
            vec!["Draft Ideas", "Async Rust", "Rust Ownership", "CSS Tricks"]
        );
    }

    #[test]
    fn test_status_filter() {
        let drafts = filter_and_sort(
            sample(),
            &AdminBlogQuery {
                status: StatusFilter::Draft,
                ..Default::default()
            },
        );
        assert_eq!(titles(&drafts), vec!["Draft Ideas"]);

        let published = filter_and_sort(
            sample(),
            &AdminBlogQuery {
                status: StatusFilter::Published,
                ..Default::default()
            },
        );
        assert_eq!(published.len(), 3);
        assert!(published.iter().all(|b| b.published));
    }

    #[test]
    fn test_search_and_tag() {
        let query = AdminBlogQuery {
            search: Some("  RUST ".to_string()),
            tag: Some("Async".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&filter_and_sort(sample(), &query)), vec!["Async Rust"]);
    }

    #[test]
    fn test_sort_by_views_asc() {
        let query = AdminBlogQuery {
            sort: BlogSortField::Views,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(
            titles(&filter_and_sort(sample(), &query)),
            vec!["Draft Ideas", "CSS Tricks", "Rust Ownership", "Async Rust"]
        );
    }

    #[test]
    fn test_sort_by_title_case_insensitive() {
        let mut blogs = sample();
        blogs.push(blog("apple pie", true, 1, 2, &[]));
        let query = AdminBlogQuery {
            sort: BlogSortField::Title,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(titles(&filter_and_sort(blogs, &query))[0], "apple pie");
    }

    #[test]
    fn test_sort_by_published_at_puts_drafts_last_when_desc() {
        let query = AdminBlogQuery {
            sort: BlogSortField::PublishedAt,
            ..Default::default()
        };
        let result = filter_and_sort(sample(), &query);
        assert_eq!(result.last().map(|b| b.title.as_str()), Some("Draft Ideas"));
    }
}
