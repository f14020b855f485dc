//! User and session domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Role of an account. Only admins may use the dashboard API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "user" => Some(UserRole::User),
            _ => None,
        }
    }
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// A server-side login session. Only the token hash is stored.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl UserSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Public view of a user (never exposes the password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            last_login_at: u.last_login_at,
            created_at: u.created_at,
        }
    }
}

/// Request body for credential login.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body for a successful login or session lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserResponse,
    pub expires_at: DateTime<Utc>,
}

/// Request body for changing the current user's password.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 1, max = 256, message = "New password must be 1-256 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            email: "owner@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "Site Owner".to_string(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("user"), Some(UserRole::User));
        assert_eq!(UserRole::parse("root"), None);
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_is_admin() {
        assert!(sample_user(UserRole::Admin).is_admin());
        assert!(!sample_user(UserRole::User).is_admin());
    }

    #[test]
    fn test_user_response_hides_password_hash() {
        let response: UserResponse = sample_user(UserRole::Admin).into();
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"role\":\"admin\""));
        assert!(json.contains("\"lastLoginAt\":null"));
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = UserSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: "abc".to_string(),
            expires_at: now + Duration::hours(1),
            created_at: now,
            last_used_at: now,
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(2)));
    }

    #[test]
    fn test_login_request_validation() {
        let ok: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.co","password":"x"}"#).unwrap();
        assert!(ok.validate().is_ok());

        let bad: LoginRequest =
            serde_json::from_str(r#"{"email":"nope","password":""}"#).unwrap();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_change_password_request_camel_case() {
        let req: ChangePasswordRequest = serde_json::from_str(
            r#"{"currentPassword":"Old1pass","newPassword":"New1passw"}"#,
        )
        .unwrap();
        assert_eq!(req.current_password, "Old1pass");
        assert_eq!(req.new_password, "New1passw");
    }
}
