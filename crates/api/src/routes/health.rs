//! Health check endpoint handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

async fn ping(state: &AppState) -> Option<u64> {
    persistence::db::ping(&state.pool)
        .await
        .ok()
        .map(|latency| latency.as_millis() as u64)
}

impl HealthResponse {
    fn from_ping(latency_ms: Option<u64>) -> (StatusCode, Self) {
        let connected = latency_ms.is_some();
        let status = if connected {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (
            status,
            Self {
                status: if connected { "healthy" } else { "unhealthy" },
                version: env!("CARGO_PKG_VERSION"),
                database: DatabaseHealth {
                    connected,
                    latency_ms,
                },
            },
        )
    }
}

/// GET /api/health
///
/// Database ping plus build version; 503 when the database is unreachable.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, body) = HealthResponse::from_ping(ping(&state).await);
    if status != StatusCode::OK {
        tracing::warn!("Health check failed: database unreachable");
    }
    (status, Json(body))
}

/// GET /api/health/live
pub async fn live() -> Json<StatusResponse> {
    Json(StatusResponse { status: "alive" })
}

/// GET /api/health/ready
pub async fn ready(State(state): State<AppState>) -> Result<Json<StatusResponse>, StatusCode> {
    match ping(&state).await {
        Some(_) => Ok(Json(StatusResponse { status: "ready" })),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
