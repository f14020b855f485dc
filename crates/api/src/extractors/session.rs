//! Session extractors for route handlers.
//!
//! Each extractor first looks for a session already resolved by
//! [`crate::middleware::session_auth`]; otherwise it reads the token from
//! the session cookie (or Bearer header) and resolves it itself.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::User;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::{AuthService, AuthenticatedSession};

/// The authenticated user of the current request. Rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedSession);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0.user
    }
}

/// An authenticated admin. Rejects with 401 without a session and 403 for
/// other roles.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedSession);

impl AdminUser {
    pub fn user(&self) -> &User {
        &self.0.user
    }
}

/// The session if one is present and valid; never rejects on missing auth.
#[derive(Debug, Clone)]
pub struct OptionalCurrentUser(pub Option<AuthenticatedSession>);

impl OptionalCurrentUser {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|s| s.user.is_admin())
    }
}

/// Resolves the request's session, reusing one cached in extensions.
pub async fn resolve_session(
    parts: &mut Parts,
    state: &AppState,
) -> Result<Option<AuthenticatedSession>, ApiError> {
    if let Some(auth) = parts.extensions.get::<AuthenticatedSession>() {
        return Ok(Some(auth.clone()));
    }

    let Some(token) = state.cookies.extract_token(&parts.headers) else {
        return Ok(None);
    };

    let service = AuthService::new(state.pool.clone(), state.config.session.ttl_secs);
    let session = service.resolve(&token).await?;
    if let Some(auth) = &session {
        parts.extensions.insert(auth.clone());
    }
    Ok(session)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(parts, state)
            .await?
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(auth) = CurrentUser::from_request_parts(parts, state).await?;
        if !auth.user.is_admin() {
            return Err(ApiError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(auth))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalCurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalCurrentUser(resolve_session(parts, state).await?))
    }
}
