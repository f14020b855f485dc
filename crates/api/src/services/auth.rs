//! Credential login and server-side session management.

use chrono::{DateTime, Duration, Utc};
use domain::models::{User, UserSession};
use persistence::repositories::UserRepository;
use shared::crypto::{generate_session_token, sha256_hex};
use shared::password::{
    hash_password, validate_password_strength, verify_password, verify_unknown_account,
    PasswordError,
};
use sqlx::PgPool;
use thiserror::Error;

use crate::error::ApiError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User is disabled")]
    UserDisabled,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // same message for unknown email, wrong password and disabled users
            AuthError::InvalidCredentials | AuthError::UserDisabled => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::WrongPassword => ApiError::validation("Current password is incorrect"),
            AuthError::Password(e) => e.into(),
            AuthError::Database(e) => e.into(),
        }
    }
}

/// A newly created session. `token` is the raw value handed to the client.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// A valid session resolved from a request token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub session: UserSession,
}

pub struct AuthService {
    users: UserRepository,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(pool: PgPool, session_ttl_secs: i64) -> Self {
        Self {
            users: UserRepository::new(pool),
            session_ttl: Duration::seconds(session_ttl_secs),
        }
    }

    /// Verifies credentials and opens a new session.
    pub async fn login(&self, email: &str, password: &str) -> Result<NewSession, AuthError> {
        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            // same Argon2 cost as a wrong password
            verify_unknown_account(password);
            return Err(AuthError::InvalidCredentials);
        };
        let user: User = user.into();

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AuthError::UserDisabled);
        }

        let now = Utc::now();
        self.users.update_last_login(user.id, now).await?;

        let token = generate_session_token();
        let expires_at = now + self.session_ttl;
        self.users
            .create_session(user.id, &sha256_hex(&token), expires_at)
            .await?;

        Ok(NewSession {
            user: User {
                last_login_at: Some(now),
                ..user
            },
            token,
            expires_at,
        })
    }

    /// Resolves a raw token to its session and active user. Expired
    /// sessions and disabled users resolve to `None`.
    pub async fn resolve(&self, token: &str) -> Result<Option<AuthenticatedSession>, AuthError> {
        let Some(session) = self.users.find_session_by_token(&sha256_hex(token)).await? else {
            return Ok(None);
        };
        let session: UserSession = session.into();
        if session.is_expired(Utc::now()) {
            return Ok(None);
        }

        let Some(user) = self.users.find_by_id(session.user_id).await? else {
            return Ok(None);
        };
        let user: User = user.into();
        if !user.is_active {
            return Ok(None);
        }

        self.users.touch_session(session.id).await?;
        Ok(Some(AuthenticatedSession { user, session }))
    }

    /// Ends the session identified by `token`. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<bool, AuthError> {
        Ok(self
            .users
            .delete_session_by_token(&sha256_hex(token))
            .await?)
    }

    /// Changes the password and revokes every other session of the user.
    /// Returns the number of revoked sessions.
    pub async fn change_password(
        &self,
        auth: &AuthenticatedSession,
        current_password: &str,
        new_password: &str,
    ) -> Result<u64, AuthError> {
        if !verify_password(current_password, &auth.user.password_hash)? {
            return Err(AuthError::WrongPassword);
        }
        validate_password_strength(new_password)?;

        let password_hash = hash_password(new_password)?;
        self.users.update_password(auth.user.id, &password_hash).await?;
        Ok(self
            .users
            .revoke_other_sessions(auth.user.id, auth.session.id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn test_credential_errors_share_message() {
        let unknown: ApiError = AuthError::InvalidCredentials.into();
        let disabled: ApiError = AuthError::UserDisabled.into();

        assert_eq!(unknown.to_string(), disabled.to_string());
        assert_eq!(unknown.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_wrong_password_is_bad_request() {
        let error: ApiError = AuthError::WrongPassword.into();
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_weak_password_is_bad_request() {
        let error: ApiError = AuthError::Password(PasswordError::TooWeak("short".into())).into();
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_error_maps_through() {
        let error: ApiError = AuthError::Database(sqlx::Error::RowNotFound).into();
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
