//! Education repository for database operations.

use chrono::NaiveDate;
use domain::models::education::{CreateEducationRequest, UpdateEducationRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EducationEntity;
use crate::metrics::QueryTimer;

const EDUCATION_COLUMNS: &str = r#"
    id, profile_id, institution, degree, field_of_study, start_date, end_date, grade,
    description, sort_order, created_at, updated_at
"#;

/// Repository for education entries, always scoped to a profile.
#[derive(Clone)]
pub struct EducationRepository {
    pool: PgPool,
}

impl EducationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<EducationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_educations");
        let result = sqlx::query_as::<_, EducationEntity>(&format!(
            r#"
            SELECT {} FROM educations
            WHERE profile_id = $1
            ORDER BY sort_order ASC, start_date DESC
            "#,
            EDUCATION_COLUMNS
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find(
        &self,
        id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<EducationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_education");
        let result = sqlx::query_as::<_, EducationEntity>(&format!(
            "SELECT {} FROM educations WHERE id = $1 AND profile_id = $2",
            EDUCATION_COLUMNS
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
        request: &CreateEducationRequest,
    ) -> Result<EducationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_education");
        let result = sqlx::query_as::<_, EducationEntity>(&format!(
            r#"
            INSERT INTO educations (
                profile_id, institution, degree, field_of_study, start_date, end_date,
                grade, description, sort_order
            )
            VALUES ($1, $2, $3, NULLIF($4, ''), $5, $6, NULLIF($7, ''), NULLIF($8, ''), $9)
            RETURNING {}
            "#,
            EDUCATION_COLUMNS
        ))
        .bind(profile_id)
        .bind(&request.institution)
        .bind(&request.degree)
        .bind(&request.field_of_study)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.grade)
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
        request: &UpdateEducationRequest,
        dates: (NaiveDate, Option<NaiveDate>),
    ) -> Result<Option<EducationEntity>, sqlx::Error> {
        let (start_date, end_date) = dates;
        let timer = QueryTimer::new("update_education");
        let result = sqlx::query_as::<_, EducationEntity>(&format!(
            r#"
            UPDATE educations SET
                institution = COALESCE($3, institution),
                degree = COALESCE($4, degree),
                field_of_study = CASE WHEN $5::text IS NULL THEN field_of_study ELSE NULLIF($5, '') END,
                start_date = $6,
                end_date = $7,
                grade = CASE WHEN $8::text IS NULL THEN grade ELSE NULLIF($8, '') END,
                description = CASE WHEN $9::text IS NULL THEN description ELSE NULLIF($9, '') END,
                sort_order = COALESCE($10, sort_order),
                updated_at = NOW()
            WHERE id = $1 AND profile_id = $2
            RETURNING {}
            "#,
            EDUCATION_COLUMNS
        ))
        .bind(id)
        .bind(profile_id)
        .bind(&request.institution)
        .bind(&request.degree)
        .bind(&request.field_of_study)
        .bind(start_date)
        .bind(end_date)
        .bind(&request.grade)
        .bind(&request.description)
        .bind(request.sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid, profile_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_education");
        let result = sqlx::query("DELETE FROM educations WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
