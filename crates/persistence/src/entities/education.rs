//! Education entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct EducationEntity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EducationEntity> for domain::models::Education {
    fn from(e: EducationEntity) -> Self {
        Self {
            id: e.id,
            profile_id: e.profile_id,
            institution: e.institution,
            degree: e.degree,
            field_of_study: e.field_of_study,
            start_date: e.start_date,
            end_date: e.end_date,
            grade: e.grade,
            description: e.description,
            sort_order: e.sort_order,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
