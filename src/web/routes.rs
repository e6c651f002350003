//! # Web API Route Definitions
//!
//! HTTP route structure for the task API. All task routes are versioned
//! under `/api/v1` by the application assembly; health endpoints live at
//! the root.

use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Create API v1 routes.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks/create", post(handlers::tasks::create_task))
        .route("/tasks", get(handlers::tasks::list_tasks))
        .route("/tasks/{task_id}", get(handlers::tasks::get_task))
        .route("/tasks/{task_id}", put(handlers::tasks::update_task))
        .route(
            "/tasks/{task_id}",
            patch(handlers::tasks::update_partial_task),
        )
        .route("/tasks/{task_id}", delete(handlers::tasks::delete_task))
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::basic_health))
        .route("/health/ready", get(handlers::health::readiness_probe))
}
