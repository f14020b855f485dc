//! Project repository for database operations.

use domain::models::project::{CreateProjectRequest, UpdateProjectRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProjectEntity;
use crate::metrics::QueryTimer;

const PROJECT_COLUMNS: &str = r#"
    id, profile_id, title, description, tech_stack, repo_url, live_url, image_url,
    featured, sort_order, created_at, updated_at
"#;

/// Repository for portfolio projects.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a profile's projects, optionally only featured ones.
    pub async fn list_by_profile(
        &self,
        profile_id: Uuid,
        featured: Option<bool>,
    ) -> Result<Vec<ProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_projects");
        let result = sqlx::query_as::<_, ProjectEntity>(&format!(
            r#"
            SELECT {} FROM projects
            WHERE profile_id = $1
              AND ($2::boolean IS NULL OR featured = $2)
            ORDER BY sort_order ASC, created_at DESC
            "#,
            PROJECT_COLUMNS
        ))
        .bind(profile_id)
        .bind(featured)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        profile_id: Uuid,
        request: &CreateProjectRequest,
        tech_stack: &[String],
    ) -> Result<ProjectEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_project");
        let result = sqlx::query_as::<_, ProjectEntity>(&format!(
            r#"
            INSERT INTO projects (
                profile_id, title, description, tech_stack, repo_url, live_url, image_url,
                featured, sort_order
            )
            VALUES ($1, $2, NULLIF($3, ''), $4, NULLIF($5, ''), NULLIF($6, ''), NULLIF($7, ''), $8, $9)
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        ))
        .bind(profile_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(tech_stack)
        .bind(&request.repo_url)
        .bind(&request.live_url)
        .bind(&request.image_url)
        .bind(request.featured)
        .bind(request.sort_order)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Apply a partial update; blank strings clear optional text columns.
    pub async fn update(
        &self,
        id: Uuid,
        profile_id: Uuid,
        request: &UpdateProjectRequest,
        tech_stack: Option<&[String]>,
    ) -> Result<Option<ProjectEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_project");
        let result = sqlx::query_as::<_, ProjectEntity>(&format!(
            r#"
            UPDATE projects SET
                title = COALESCE($3, title),
                description = CASE WHEN $4::text IS NULL THEN description ELSE NULLIF($4, '') END,
                tech_stack = COALESCE($5, tech_stack),
                repo_url = CASE WHEN $6::text IS NULL THEN repo_url ELSE NULLIF(btrim($6), '') END,
                live_url = CASE WHEN $7::text IS NULL THEN live_url ELSE NULLIF(btrim($7), '') END,
                image_url = CASE WHEN $8::text IS NULL THEN image_url ELSE NULLIF(btrim($8), '') END,
                featured = COALESCE($9, featured),
                sort_order = COALESCE($10, sort_order),
                updated_at = NOW()
            WHERE id = $1 AND profile_id = $2
            RETURNING {}
            "#,
            PROJECT_COLUMNS
        ))
        .bind(id)
        .bind(profile_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(tech_stack)
        .bind(&request.repo_url)
        .bind(&request.live_url)
        .bind(&request.image_url)
        .bind(request.featured)
        .bind(request.sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid, profile_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_project");
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
