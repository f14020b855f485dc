//! User and session entities (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::UserRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            name: entity.name,
            // the column is constrained; unknown values get the least privilege
            role: UserRole::parse(&entity.role).unwrap_or(UserRole::User),
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            last_login_at: entity.last_login_at,
        }
    }
}

/// Database row mapping for the user_sessions table.
#[derive(Debug, Clone, FromRow)]
pub struct UserSessionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl From<UserSessionEntity> for domain::models::UserSession {
    fn from(entity: UserSessionEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            token_hash: entity.token_hash,
            expires_at: entity.expires_at,
            created_at: entity.created_at,
            last_used_at: entity.last_used_at,
        }
    }
}
