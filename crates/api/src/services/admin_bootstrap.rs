//! Creates the site owner's admin account on first startup.

use domain::models::UserRole;
use persistence::repositories::UserRepository;
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AdminConfig;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// What the bootstrap step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AlreadyExists,
    Created,
}

/// Creates an admin user from configuration unless one with the same
/// email already exists. Safe to run on every startup.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    let email = config.bootstrap_email.trim().to_lowercase();
    if email.is_empty() {
        return Ok(BootstrapOutcome::NotConfigured);
    }
    if config.bootstrap_password.is_empty() {
        warn!("PF__ADMIN__BOOTSTRAP_EMAIL is set but the password is empty - skipping bootstrap");
        return Ok(BootstrapOutcome::NotConfigured);
    }

    let users = UserRepository::new(pool.clone());
    if users.find_by_email(&email).await?.is_some() {
        info!(email = %email, "Bootstrap admin already exists");
        return Ok(BootstrapOutcome::AlreadyExists);
    }

    let password_hash = hash_password(&config.bootstrap_password)?;
    let name = match config.bootstrap_name.trim() {
        "" => "Administrator",
        name => name,
    };

    match users
        .create_user(&email, &password_hash, name, UserRole::Admin.as_str())
        .await
    {
        Ok(user) => {
            info!(email = %email, user_id = %user.id, "Bootstrap admin user created");
            warn!(
                "Remove PF__ADMIN__BOOTSTRAP_PASSWORD from the environment after initial setup"
            );
            Ok(BootstrapOutcome::Created)
        }
        // another instance won the race
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
            Ok(BootstrapOutcome::AlreadyExists)
        }
        Err(e) => Err(e.into()),
    }
}
