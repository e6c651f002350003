//! # Web API Module
//!
//! Axum-based REST API for the task manager. The request layer owns wire
//! parsing, the kind-to-status error mapping, CORS, and request tracing;
//! all domain behavior stays in `models` and `scopes`.
//!
//! ## Core Components
//!
//! - [`routes`] - HTTP route definitions and organization
//! - [`handlers`] - Request handlers for the task and health endpoints
//! - [`state`] - Shared application state (pool + configuration)
//! - [`response_types`] - Wire-level error types and status mapping

pub mod handlers;
pub mod response_types;
pub mod routes;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;
use state::AppState;

/// Create the main Axum application with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .merge(routes::health_routes())
        .nest("/api/v1", routes::api_v1_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if config.any_origin() {
        // Wildcards cannot be combined with credentials.
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_origin(origins)
            .allow_credentials(config.allow_credentials)
    }
}
