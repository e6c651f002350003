//! # Web API Application State
//!
//! Shared state for the web API: the connection pool plus the configuration
//! it was built from. Cloned per request by axum; both members are cheap
//! handles.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::database;

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
}

impl AppState {
    /// Wrap an existing pool; used by tests that bring their own.
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            pool,
        }
    }

    /// Build the pool from configuration.
    pub async fn from_config(config: AppConfig) -> Result<Self, sqlx::Error> {
        let pool = database::connect(&config.database).await?;
        Ok(Self::new(config, pool))
    }
}
