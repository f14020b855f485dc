//! Social media link entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct SocialMediaEntity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub platform: String,
    pub url: String,
    pub username: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SocialMediaEntity> for domain::models::SocialMedia {
    fn from(e: SocialMediaEntity) -> Self {
        Self {
            id: e.id,
            profile_id: e.profile_id,
            platform: e.platform,
            url: e.url,
            username: e.username,
            icon: e.icon,
            sort_order: e.sort_order,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
