//! # Health Check Handlers
//!
//! Liveness/readiness endpoints for monitoring and load balancing.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::database;
use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Basic health check endpoint: GET /health
///
/// Returns OK as long as the process is serving requests.
pub async fn basic_health(_state: State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Readiness probe: GET /health/ready
///
/// Verifies database connectivity before reporting ready.
pub async fn readiness_probe(
    State(state): State<AppState>,
) -> ApiResult<Json<HealthResponse>> {
    debug!("performing readiness probe");

    let healthy = database::health_check(&state.pool)
        .await
        .map_err(|_| ApiError::database_error("database connectivity check failed"))?;

    if !healthy {
        return Err(ApiError::database_error(
            "database connectivity check failed",
        ));
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}
