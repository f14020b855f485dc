//! Skill domain repository for database operations.

use domain::models::skill_domain::{CreateSkillDomainRequest, UpdateSkillDomainRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SkillDomainEntity;
use crate::metrics::QueryTimer;

const SKILL_DOMAIN_COLUMNS: &str =
    "id, name, description, technologies, level, icon, sort_order, created_at, updated_at";

/// Repository for the skill domain taxonomy. Names are unique; inserting or
/// renaming to a taken name fails with a unique violation.
#[derive(Clone)]
pub struct SkillDomainRepository {
    pool: PgPool,
}

impl SkillDomainRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<SkillDomainEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_skill_domains");
        let result = sqlx::query_as::<_, SkillDomainEntity>(&format!(
            "SELECT {} FROM skill_domains ORDER BY sort_order ASC, name ASC",
            SKILL_DOMAIN_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        request: &CreateSkillDomainRequest,
    ) -> Result<SkillDomainEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_skill_domain");
        let result = sqlx::query_as::<_, SkillDomainEntity>(&format!(
            r#"
            INSERT INTO skill_domains (name, description, technologies, level, icon, sort_order)
            VALUES ($1, NULLIF($2, ''), $3, $4, NULLIF($5, ''), $6)
            RETURNING {}
            "#,
            SKILL_DOMAIN_COLUMNS
        ))
        .bind(request.name.trim())
        .bind(&request.description)
        .bind(&request.technologies)
        .bind(request.level.as_str())
        .bind(&request.icon)
        .bind(request.sort_order)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateSkillDomainRequest,
    ) -> Result<Option<SkillDomainEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_skill_domain");
        let result = sqlx::query_as::<_, SkillDomainEntity>(&format!(
            r#"
            UPDATE skill_domains SET
                name = COALESCE($2, name),
                description = CASE WHEN $3::text IS NULL THEN description ELSE NULLIF($3, '') END,
                technologies = COALESCE($4, technologies),
                level = COALESCE($5, level),
                icon = CASE WHEN $6::text IS NULL THEN icon ELSE NULLIF($6, '') END,
                sort_order = COALESCE($7, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SKILL_DOMAIN_COLUMNS
        ))
        .bind(id)
        .bind(request.name.as_deref().map(str::trim))
        .bind(&request.description)
        .bind(&request.technologies)
        .bind(request.level.map(|l| l.as_str()))
        .bind(&request.icon)
        .bind(request.sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_skill_domain");
        let result = sqlx::query("DELETE FROM skill_domains WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
