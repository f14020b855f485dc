//! Blog analytics aggregation for the admin dashboard.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

use crate::models::analytics::{
    AnalyticsTotals, BlogAnalytics, MonthlyPublications, TagStats, TopPost,
};
use crate::models::blog::Blog;

/// Size of the top-by-views and top-by-claps rankings.
pub const TOP_POSTS: usize = 5;

/// Number of calendar months in the publication history, current month included.
pub const HISTORY_MONTHS: u32 = 12;

/// Computes the full report over every post.
pub fn aggregate(blogs: &[Blog], now: DateTime<Utc>) -> BlogAnalytics {
    BlogAnalytics {
        totals: totals(blogs),
        top_by_views: top_by(blogs, |b| b.views),
        top_by_claps: top_by(blogs, |b| b.claps),
        tags: tag_stats(blogs),
        monthly: monthly_publications(blogs, now),
        generated_at: now,
    }
}

fn totals(blogs: &[Blog]) -> AnalyticsTotals {
    let published: Vec<&Blog> = blogs.iter().filter(|b| b.published).collect();
    let published_views: i64 = published.iter().map(|b| b.views).sum();
    let avg = if published.is_empty() {
        0.0
    } else {
        (published_views as f64 / published.len() as f64 * 100.0).round() / 100.0
    };

    AnalyticsTotals {
        blogs: blogs.len() as i64,
        published: published.len() as i64,
        drafts: (blogs.len() - published.len()) as i64,
        views: blogs.iter().map(|b| b.views).sum(),
        claps: blogs.iter().map(|b| b.claps).sum(),
        avg_views_per_post: avg,
    }
}

fn top_by<F: Fn(&Blog) -> i64>(blogs: &[Blog], metric: F) -> Vec<TopPost> {
    let mut ranked: Vec<&Blog> = blogs.iter().collect();
    ranked.sort_by(|a, b| metric(b).cmp(&metric(a)).then_with(|| a.title.cmp(&b.title)));
    ranked
        .into_iter()
        .take(TOP_POSTS)
        .map(|b| TopPost {
            id: b.id,
            title: b.title.clone(),
            slug: b.slug.clone(),
            views: b.views,
            claps: b.claps,
            published: b.published,
        })
        .collect()
}

fn tag_stats(blogs: &[Blog]) -> Vec<TagStats> {
    let mut by_tag: HashMap<String, TagStats> = HashMap::new();
    for blog in blogs {
        for tag in &blog.tags {
            let key = tag.to_lowercase();
            let entry = by_tag.entry(key.clone()).or_insert_with(|| TagStats {
                tag: key,
                posts: 0,
                views: 0,
                claps: 0,
            });
            entry.posts += 1;
            entry.views += blog.views;
            entry.claps += blog.claps;
        }
    }

    let mut stats: Vec<TagStats> = by_tag.into_values().collect();
    stats.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.tag.cmp(&b.tag)));
    stats
}

/// Publication counts for the last 12 months, oldest first, zero-filled.
fn monthly_publications(blogs: &[Blog], now: DateTime<Utc>) -> Vec<MonthlyPublications> {
    let mut counts: HashMap<(i32, u32), i64> = HashMap::new();
    for blog in blogs.iter().filter(|b| b.published) {
        if let Some(at) = blog.published_at {
            *counts.entry((at.year(), at.month())).or_default() += 1;
        }
    }

    (0..HISTORY_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = months_before(now.year(), now.month(), back);
            MonthlyPublications {
                month: format!("{:04}-{:02}", year, month),
                count: counts.get(&(year, month)).copied().unwrap_or(0),
            }
        })
        .collect()
}

fn months_before(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blog::SeoMetadata;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn blog(title: &str, published_at: Option<DateTime<Utc>>, views: i64, claps: i64, tags: &[&str]) -> Blog {
        Blog {
            id: Uuid::new_v4(),
            author_id: Uuid::nil(),
            title: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            excerpt: None,
            content: String::new(),
            cover_image: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            published: published_at.is_some(),
            featured: false,
            published_at,
            views,
            claps,
            reading_time_minutes: 1,
            seo: SeoMetadata::default(),
            created_at: at(2024, 1, 1),
            updated_at: at(2024, 1, 1),
        }
    }

    #[test]
    fn test_empty() {
        let report = aggregate(&[], at(2024, 6, 15));
        assert_eq!(report.totals, AnalyticsTotals::default());
        assert!(report.top_by_views.is_empty());
        assert!(report.tags.is_empty());
        assert_eq!(report.monthly.len(), 12);
        assert!(report.monthly.iter().all(|m| m.count == 0));
    }

    #[test]
    fn test_totals_and_average() {
        let blogs = vec![
            blog("A", Some(at(2024, 5, 1)), 10, 1, &[]),
            blog("B", Some(at(2024, 6, 1)), 5, 2, &[]),
            blog("C", None, 100, 0, &[]),
        ];
        let totals = aggregate(&blogs, at(2024, 6, 15)).totals;
        assert_eq!(totals.blogs, 3);
        assert_eq!(totals.published, 2);
        assert_eq!(totals.drafts, 1);
        assert_eq!(totals.views, 115);
        assert_eq!(totals.claps, 3);
        assert_eq!(totals.avg_views_per_post, 7.5);
    }

    #[test]
    fn test_top_lists_limited_and_ordered() {
        let blogs: Vec<Blog> = (0..8)
            .map(|i| blog(&format!("Post {}", i), Some(at(2024, 1, 1)), i * 10, 80 - i * 10, &[]))
            .collect();
        let report = aggregate(&blogs, at(2024, 6, 15));
        assert_eq!(report.top_by_views.len(), TOP_POSTS);
        assert_eq!(report.top_by_views[0].title, "Post 7");
        assert_eq!(report.top_by_claps[0].title, "Post 0");
    }

    #[test]
    fn test_tag_stats_sorted_by_views() {
        let blogs = vec![
            blog("A", Some(at(2024, 5, 1)), 10, 1, &["rust", "web"]),
            blog("B", Some(at(2024, 6, 1)), 30, 2, &["Web"]),
        ];
        let tags = aggregate(&blogs, at(2024, 6, 15)).tags;
        assert_eq!(tags[0].tag, "web");
        assert_eq!(tags[0].posts, 2);
        assert_eq!(tags[0].views, 40);
        assert_eq!(tags[1].tag, "rust");
        assert_eq!(tags[1].claps, 1);
    }

    #[test]
    fn test_monthly_zero_filled_across_year_boundary() {
        let blogs = vec![
            blog("Old", Some(at(2022, 1, 1)), 0, 0, &[]),
            blog("Feb", Some(at(2023, 3, 10)), 0, 0, &[]),
            blog("Jan", Some(at(2024, 1, 20)), 0, 0, &[]),
            blog("Jan2", Some(at(2024, 1, 21)), 0, 0, &[]),
        ];
        let monthly = aggregate(&blogs, at(2024, 2, 5)).monthly;
        assert_eq!(monthly.len(), 12);
        assert_eq!(monthly.first().unwrap().month, "2023-03");
        assert_eq!(monthly.first().unwrap().count, 1);
        assert_eq!(monthly[10].month, "2024-01");
        assert_eq!(monthly[10].count, 2);
        assert_eq!(monthly.last().unwrap().month, "2024-02");
        assert_eq!(monthly.iter().map(|m| m.count).sum::<i64>(), 3);
    }
}
