//! Experience repository for database operations.

use chrono::NaiveDate;
use domain::models::experience::{CreateExperienceRequest, UpdateExperienceRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ExperienceEntity;
use crate::metrics::QueryTimer;

const EXPERIENCE_COLUMNS: &str = r#"
    id, profile_id, company, position, location, start_date, end_date, is_current,
    description, sort_order, created_at, updated_at
"#;

/// Repository for experience entries, always scoped to a profile.
#[derive(Clone)]
pub struct ExperienceRepository {
    pool: PgPool,
}

impl ExperienceRepository {
    /// Creates a new ExperienceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a profile's experiences, by sort order then most recent first.
    pub async fn list_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<ExperienceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_experiences");
        let result = sqlx::query_as::<_, ExperienceEntity>(&format!(
            r#"
            SELECT {} FROM experiences
            WHERE profile_id = $1
            ORDER BY sort_order ASC, start_date DESC
            "#,
            EXPERIENCE_COLUMNS
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an experience belonging to the given profile.
    pub async fn find(
        &self,
        id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<ExperienceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_experience");
        let result = sqlx::query_as::<_, ExperienceEntity>(&format!(
            "SELECT {} FROM experiences WHERE id = $1 AND profile_id = $2",
            EXPERIENCE_COLUMNS
        ))
        .bind(id)
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        profile_id: Uuid,
        request: &CreateExperienceRequest,
    ) -> Result<ExperienceEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_experience");
        let result = sqlx::query_as::<_, ExperienceEntity>(&format!(
            r#"
            INSERT INTO experiences (
                profile_id, company, position, location, start_date, end_date,
                is_current, description, sort_order
            )
            VALUES ($1, $2, $3, NULLIF($4, ''), $5, $6, $7, NULLIF($8, ''), $9)
            RETURNING {}
            "#,
            EXPERIENCE_COLUMNS
        ))
        .bind(profile_id)
        .bind(&request.company)
        .bind(&request.position)
        .bind(&request.location)
        .bind(request.start_date)
        .bind(request.effective_end_date())
        .bind(request.is_current)
        .bind(&request.description)
        .bind(request.sort_order)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Apply a partial update. Dates are pre-resolved by the caller; blank
    /// strings clear optional text columns.
    pub async fn update(
        &self,
        id: Uuid,
        profile_id: Uuid,
        request: &UpdateExperienceRequest,
        dates: (NaiveDate, Option<NaiveDate>, bool),
    ) -> Result<Option<ExperienceEntity>, sqlx::Error> {
        let (start_date, end_date, is_current) = dates;
        let timer = QueryTimer::new("update_experience");
        let result = sqlx::query_as::<_, ExperienceEntity>(&format!(
            r#"
            UPDATE experiences SET
                company = COALESCE($3, company),
                position = COALESCE($4, position),
                location = CASE WHEN $5::text IS NULL THEN location ELSE NULLIF($5, '') END,
                start_date = $6,
                end_date = $7,
                is_current = $8,
                description = CASE WHEN $9::text IS NULL THEN description ELSE NULLIF($9, '') END,
                sort_order = COALESCE($10, sort_order),
                updated_at = NOW()
            WHERE id = $1 AND profile_id = $2
            RETURNING {}
            "#,
            EXPERIENCE_COLUMNS
        ))
        .bind(id)
        .bind(profile_id)
        .bind(&request.company)
        .bind(&request.position)
        .bind(&request.location)
        .bind(start_date)
        .bind(end_date)
        .bind(is_current)
        .bind(&request.description)
        .bind(request.sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete an experience; returns false if it did not exist for this profile.
    pub async fn delete(&self, id: Uuid, profile_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_experience");
        let result = sqlx::query("DELETE FROM experiences WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
