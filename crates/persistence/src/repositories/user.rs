//! User and session repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{UserEntity, UserSessionEntity};
use crate::metrics::QueryTimer;

const USER_COLUMNS: &str =
    "id, email, password_hash, name, role, is_active, created_at, updated_at, last_login_at";

const SESSION_COLUMNS: &str = "id, user_id, token_hash, expires_at, created_at, last_used_at";

/// Repository for accounts and their login sessions.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by email address (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_email");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            "SELECT {} FROM users WHERE LOWER(email) = LOWER($1)",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find the earliest-created active admin; their profile is the public site profile.
    pub async fn find_site_owner(&self) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_site_owner");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            SELECT {} FROM users
            WHERE role = 'admin' AND is_active = true
            ORDER BY created_at ASC
            LIMIT 1
            "#,
            USER_COLUMNS
        ))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a new user account.
    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        role: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (email, password_hash, name, role, is_active)
            VALUES ($1, $2, $3, $4, true)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update user's last login timestamp.
    pub async fn update_last_login(
        &self,
        user_id: Uuid,
        last_login_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_user_last_login");
        sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(last_login_at)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Replace a user's password hash.
    pub async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("update_user_password");
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(password_hash)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(())
    }

    /// Create a new login session.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<UserSessionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user_session");
        let result = sqlx::query_as::<_, UserSessionEntity>(&format!(
            r#"
            INSERT INTO user_sessions (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an unexpired session by token hash.
    pub async fn find_session_by_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<UserSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_session_by_token");
        let result = sqlx::query_as::<_, UserSessionEntity>(&format!(
            "SELECT {} FROM user_sessions WHERE token_hash = $1 AND expires_at > NOW()",
            SESSION_COLUMNS
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update session last_used_at timestamp.
    pub async fn touch_session(&self, session_id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("touch_session");
        sqlx::query("UPDATE user_sessions SET last_used_at = NOW() WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(())
    }

    /// Delete a session by token hash (logout).
    pub async fn delete_session_by_token(&self, token_hash: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_session_by_token");
        let result = sqlx::query("DELETE FROM user_sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Revoke every session of a user except `keep_session_id`.
    pub async fn revoke_other_sessions(
        &self,
        user_id: Uuid,
        keep_session_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("revoke_other_sessions");
        let result = sqlx::query(
            r#"
            DELETE FROM user_sessions
            WHERE user_id = $1 AND id <> $2
            "#,
        )
        .bind(user_id)
        .bind(keep_session_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Delete up to `batch_size` expired sessions; returns how many were removed.
    pub async fn delete_expired_sessions(&self, batch_size: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_expired_sessions");
        let result = sqlx::query(
            r#"
            WITH to_delete AS (
                SELECT id FROM user_sessions
                WHERE expires_at <= NOW()
                LIMIT $1
            )
            DELETE FROM user_sessions
            WHERE id IN (SELECT id FROM to_delete)
            "#,
        )
        .bind(batch_size)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
