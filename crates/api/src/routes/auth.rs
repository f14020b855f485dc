//! Authentication routes: credential login, logout, session lookup and
//! password change.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use domain::models::user::{ChangePasswordRequest, LoginRequest, SessionResponse};
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::metrics::record_login;
use crate::services::{AuthError, AuthService};

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.pool.clone(), state.config.session.ttl_secs)
}

/// POST /api/auth/login
///
/// Sets the session cookie and returns the user. Unknown email, wrong
/// password and disabled accounts all yield the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<SessionResponse>), ApiError> {
    request.validate()?;

    let session = match auth_service(&state)
        .login(&request.email, &request.password)
        .await
    {
        Ok(session) => session,
        Err(err @ (AuthError::InvalidCredentials | AuthError::UserDisabled)) => {
            record_login(false);
            warn!(reason = %err, "Login rejected");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };
    record_login(true);
    info!(user_id = %session.user.id, "User logged in");

    let mut headers = HeaderMap::new();
    state.cookies.set_session_cookie(&mut headers, &session.token);

    Ok((
        headers,
        Json(SessionResponse {
            user: session.user.into(),
            expires_at: session.expires_at,
        }),
    ))
}

/// POST /api/auth/logout
///
/// Always 204; the cookie is cleared even when no session exists.
pub async fn logout(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    if let Some(token) = state.cookies.extract_token(&request_headers) {
        if auth_service(&state).logout(&token).await? {
            info!("User logged out");
        }
    }

    let mut headers = HeaderMap::new();
    state.cookies.clear_session_cookie(&mut headers);
    Ok((StatusCode::NO_CONTENT, headers))
}

/// GET /api/auth/session
pub async fn current_session(current: CurrentUser) -> Json<SessionResponse> {
    let CurrentUser(auth) = current;
    Json(SessionResponse {
        expires_at: auth.session.expires_at,
        user: auth.user.into(),
    })
}

/// PUT /api/auth/password
///
/// Keeps the calling session and revokes all others.
pub async fn change_password(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    request.validate()?;

    let revoked = auth_service(&state)
        .change_password(&current.0, &request.current_password, &request.new_password)
        .await?;
    info!(user_id = %current.user().id, revoked_sessions = revoked, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}
