//! Project entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ProjectEntity {
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

impl From<ProjectEntity> for domain::models::Project {
    fn from(e: ProjectEntity) -> Self {
        Self {
            id: e.id,
            profile_id: e.profile_id,
            title: e.title,
            description: e.description,
            tech_stack: e.tech_stack,
            repo_url: e.repo_url,
            live_url: e.live_url,
            image_url: e.image_url,
            featured: e.featured,
            sort_order: e.sort_order,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
