//! Portfolio projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone)]
pub struct Project {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tech_stack: Vec<String>,

    #[validate(url(message = "Repository must be a valid URL"))]
    pub repo_url: Option<String>,

    #[validate(url(message = "Live URL must be a valid URL"))]
    pub live_url: Option<String>,

    #[validate(url(message = "Image must be a valid URL"))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub tech_stack: Option<Vec<String>>,

    #[validate(custom(function = "shared::validation::validate_clearable_url"))]
    pub repo_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_clearable_url"))]
    pub live_url: Option<String>,

    #[validate(custom(function = "shared::validation::validate_clearable_url"))]
    pub image_url: Option<String>,

    pub featured: Option<bool>,

    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: Option<i32>,
}

/// Query parameters for the public project listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub image_url: Option<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            tech_stack: p.tech_stack,
            repo_url: p.repo_url,
            live_url: p.live_url,
            image_url: p.image_url,
            featured: p.featured,
            sort_order: p.sort_order,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
