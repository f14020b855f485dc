//! Blog analytics report for the admin dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Full analytics report computed over every blog post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogAnalytics {
    pub totals: AnalyticsTotals,
    pub top_by_views: Vec<TopPost>,
    pub top_by_claps: Vec<TopPost>,
    pub tags: Vec<TagStats>,
    pub monthly: Vec<MonthlyPublications>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTotals {
    pub blogs: i64,
    pub published: i64,
    pub drafts: i64,
    pub views: i64,
    pub claps: i64,
    /// Average views per published post, rounded to two decimals.
    pub avg_views_per_post: f64,
}

/// A post in one of the top-N rankings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub views: i64,
    pub claps: i64,
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagStats {
    pub tag: String,
    pub posts: i64,
    pub views: i64,
    pub claps: i64,
}

/// Number of posts first published in a calendar month (`YYYY-MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPublications {
    pub month: String,
    pub count: i64,
}
