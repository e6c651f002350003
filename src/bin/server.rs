//! Taskman API server entrypoint: logging, configuration, database pool,
//! migrations, then serve.

use anyhow::Context;
use tracing::info;

use taskman::config::ConfigManager;
use taskman::database;
use taskman::logging;
use taskman::web::{self, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let manager = ConfigManager::load().context("loading configuration")?;
    let environment = manager.environment().to_string();
    let config = manager.into_config();

    let state = AppState::from_config(config)
        .await
        .context("connecting to database")?;
    database::run_migrations(&state.pool)
        .await
        .context("running migrations")?;

    let addr = format!("{}:{}", state.config.http.host, state.config.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, environment, "taskman API listening");

    axum::serve(listener, web::create_app(state))
        .await
        .context("serving HTTP")?;
    Ok(())
}
