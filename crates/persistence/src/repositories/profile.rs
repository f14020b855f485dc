//! Profile repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProfileEntity;
use crate::metrics::QueryTimer;

const PROFILE_COLUMNS: &str = r#"
    id, user_id, full_name, headline, bio, avatar_url, location, contact_email, phone,
    website, resume_url, skills, available_for_hire, created_at, updated_at
"#;

/// Input data for creating or replacing a profile.
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub full_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub resume_url: Option<String>,
    /// Normalized skills JSON; `None` keeps the stored value on update.
    pub skills: Option<String>,
    pub available_for_hire: bool,
}

/// Repository for profile database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the profile owned by a user.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_user");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {} FROM profiles WHERE user_id = $1",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert the user's profile, or replace it if one exists.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> Result<ProfileEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            INSERT INTO profiles (
                user_id, full_name, headline, bio, avatar_url, location, contact_email,
                phone, website, resume_url, skills, available_for_hire
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                headline = EXCLUDED.headline,
                bio = EXCLUDED.bio,
                avatar_url = EXCLUDED.avatar_url,
                location = EXCLUDED.location,
                contact_email = EXCLUDED.contact_email,
                phone = EXCLUDED.phone,
                website = EXCLUDED.website,
                resume_url = EXCLUDED.resume_url,
                skills = COALESCE(EXCLUDED.skills, profiles.skills),
                available_for_hire = EXCLUDED.available_for_hire,
                updated_at = NOW()
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .bind(&input.full_name)
        .bind(&input.headline)
        .bind(&input.bio)
        .bind(&input.avatar_url)
        .bind(&input.location)
        .bind(&input.contact_email)
        .bind(&input.phone)
        .bind(&input.website)
        .bind(&input.resume_url)
        .bind(&input.skills)
        .bind(input.available_for_hire)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
