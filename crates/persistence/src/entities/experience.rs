//! Experience entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct ExperienceEntity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExperienceEntity> for domain::models::Experience {
    fn from(e: ExperienceEntity) -> Self {
        Self {
            id: e.id,
            profile_id: e.profile_id,
            company: e.company,
            position: e.position,
            location: e.location,
            start_date: e.start_date,
            end_date: e.end_date,
            is_current: e.is_current,
            description: e.description,
            sort_order: e.sort_order,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
