//! Social media link repository for database operations.

use domain::models::social_media::{CreateSocialMediaRequest, UpdateSocialMediaRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::SocialMediaEntity;
use crate::metrics::QueryTimer;

const SOCIAL_COLUMNS: &str =
    "id, profile_id, platform, url, username, icon, sort_order, created_at, updated_at";

#[derive(Clone)]
pub struct SocialMediaRepository {
    pool: PgPool,
}

impl SocialMediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<SocialMediaEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_social_media");
        let result = sqlx::query_as::<_, SocialMediaEntity>(&format!(
            r#"
            SELECT {} FROM social_media
            WHERE profile_id = $1
            ORDER BY sort_order ASC, platform ASC
            "#,
            SOCIAL_COLUMNS
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        profile_id: Uuid,
        request: &CreateSocialMediaRequest,
    ) -> Result<SocialMediaEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_social_media");
        let result = sqlx::query_as::<_, SocialMediaEntity>(&format!(
            r#"
            INSERT INTO social_media (profile_id, platform, url, username, icon, sort_order)
            VALUES ($1, $2, $3, NULLIF($4, ''), NULLIF($5, ''), $6)
            RETURNING {}
            "#,
            SOCIAL_COLUMNS
        ))
        .bind(profile_id)
        .bind(&request.platform)
        .bind(&request.url)
        .bind(&request.username)
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
        profile_id: Uuid,
        request: &UpdateSocialMediaRequest,
    ) -> Result<Option<SocialMediaEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_social_media");
        let result = sqlx::query_as::<_, SocialMediaEntity>(&format!(
            r#"
            UPDATE social_media SET
                platform = COALESCE($3, platform),
                url = COALESCE($4, url),
                username = CASE WHEN $5::text IS NULL THEN username ELSE NULLIF($5, '') END,
                icon = CASE WHEN $6::text IS NULL THEN icon ELSE NULLIF($6, '') END,
                sort_order = COALESCE($7, sort_order),
                updated_at = NOW()
            WHERE id = $1 AND profile_id = $2
            RETURNING {}
            "#,
            SOCIAL_COLUMNS
        ))
        .bind(id)
        .bind(profile_id)
        .bind(&request.platform)
        .bind(&request.url)
        .bind(&request.username)
        .bind(&request.icon)
        .bind(request.sort_order)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: Uuid, profile_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_social_media");
        let result = sqlx::query("DELETE FROM social_media WHERE id = $1 AND profile_id = $2")
            .bind(id)
            .bind(profile_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
