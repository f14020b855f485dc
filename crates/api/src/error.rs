use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use domain::services::SlugError;
use serde::Serialize;
use shared::password::PasswordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<ValidationDetail>,
    },

    #[error("Rate limited")]
    RateLimited { retry_after_secs: u64 },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Validation failure without per-field details.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<ValidationDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut retry_after = None;
        let (status, error_code, message, details) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, vec![]),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, vec![]),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, vec![]),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, vec![]),
            ApiError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, "validation_error", message, details)
            }
            ApiError::RateLimited { retry_after_secs } => {
                retry_after = Some(retry_after_secs);
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "rate_limited",
                    format!(
                        "Too many requests. Please try again in {} seconds.",
                        retry_after_secs
                    ),
                    vec![],
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                    vec![],
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg,
                vec![],
            ),
        };

        let body = ErrorBody {
            error: error_code,
            message,
            details,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => ApiError::Conflict("Resource already exists".into()),
                Some("23503") => ApiError::NotFound("Referenced resource not found".into()),
                Some("23514") => ApiError::validation("Value violates a data constraint"),
                _ => ApiError::Internal(format!("Database error: {}", db_err)),
            },
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| ValidationDetail {
                    field: field.to_string(),
                    message: e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));

        let message = match details.as_slice() {
            [] => "Invalid request".to_string(),
            [only] => only.message.clone(),
            many => format!("{} validation errors", many.len()),
        };

        ApiError::Validation { message, details }
    }
}

impl From<validator::ValidationError> for ApiError {
    fn from(err: validator::ValidationError) -> Self {
        ApiError::validation(
            err.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string()),
        )
    }
}

impl From<SlugError<sqlx::Error>> for ApiError {
    fn from(err: SlugError<sqlx::Error>) -> Self {
        match err {
            SlugError::Exhausted(base) => {
                ApiError::Conflict(format!("No free slug available for '{}'", base))
            }
            SlugError::Store(e) => e.into(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooWeak(msg) => ApiError::validation(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (ApiError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Conflict("x".into()), StatusCode::CONFLICT),
            (ApiError::validation("x"), StatusCode::BAD_REQUEST),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_rate_limited_sets_retry_after() {
        let response = ApiError::RateLimited {
            retry_after_secs: 12,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "12");
    }

    #[test]
    fn test_api_error_display() {
        assert_eq!(
            format!("{}", ApiError::Unauthorized("test".to_string())),
            "Unauthorized: test"
        );
        assert_eq!(
            format!("{}", ApiError::validation("bad")),
            "Validation error: bad"
        );
        assert_eq!(
            format!("{}", ApiError::RateLimited { retry_after_secs: 1 }),
            "Rate limited"
        );
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, ApiError::NotFound(msg) if msg == "Resource not found"));
    }

    #[test]
    fn test_from_validation_errors_collects_details() {
        let request: domain::models::user::LoginRequest =
            serde_json::from_str(r#"{"email":"nope","password":""}"#).unwrap();
        let error: ApiError = request.validate().unwrap_err().into();
        match error {
            ApiError::Validation { message, details } => {
                assert_eq!(message, "2 validation errors");
                assert_eq!(details[0].field, "email");
                assert_eq!(details[1].field, "password");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_slug_error() {
        let error: ApiError = SlugError::<sqlx::Error>::Exhausted("post".into()).into();
        assert!(matches!(error, ApiError::Conflict(_)));

        let error: ApiError = SlugError::Store(sqlx::Error::RowNotFound).into();
        assert!(matches!(error, ApiError::NotFound(_)));
    }

    #[test]
    fn test_from_password_error() {
        let error: ApiError = PasswordError::TooWeak("too short".into()).into();
        assert!(matches!(error, ApiError::Validation { .. }));

        let error: ApiError = PasswordError::HashError("boom".into()).into();
        assert!(matches!(error, ApiError::Internal(_)));
    }
}
