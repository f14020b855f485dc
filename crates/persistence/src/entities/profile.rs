//! Profile entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Option<String>,
    pub available_for_hire: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileEntity> for domain::models::Profile {
    fn from(e: ProfileEntity) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            full_name: e.full_name,
            headline: e.headline,
            bio: e.bio,
            avatar_url: e.avatar_url,
            location: e.location,
            contact_email: e.contact_email,
            phone: e.phone,
            website: e.website,
            resume_url: e.resume_url,
            skills: e.skills,
            available_for_hire: e.available_for_hire,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
