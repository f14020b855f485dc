//! Session authentication middleware for the admin API.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::AuthService;

/// Middleware that requires a valid session belonging to an admin.
///
/// Missing or expired sessions get 401, other roles get 403. The resolved
/// session is stored in request extensions for the handler extractors.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = state.cookies.extract_token(req.headers()) else {
        return ApiError::Unauthorized("Authentication required".to_string()).into_response();
    };

    let service = AuthService::new(state.pool.clone(), state.config.session.ttl_secs);
    match service.resolve(&token).await {
        Ok(Some(auth)) if auth.user.is_admin() => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Ok(Some(auth)) => {
            tracing::debug!(user_id = %auth.user.id, "Non-admin session rejected");
            ApiError::Forbidden("Admin access required".to_string()).into_response()
        }
        Ok(None) => {
            ApiError::Unauthorized("Session expired or invalid".to_string()).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}
