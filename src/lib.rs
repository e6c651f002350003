//! # Taskman
//!
//! Task management REST API backed by PostgreSQL.
//!
//! ## Overview
//!
//! The interesting parts are the **task scope** (safe translation of
//! untrusted sort/filter/pagination parameters into parameterized SQL) and
//! the **task mutation engine** (transaction-per-mutation writes with a
//! fixed storage-error taxonomy). Everything else is the surrounding
//! service: axum request layer, configuration, logging, migrations.
//!
//! ## Module Organization
//!
//! - [`models`] - The Task entity and its mutation engine
//! - [`scopes`] - Allow-listed, chainable query building for the list endpoint
//! - [`database`] - Pool construction, migrations, health probe
//! - [`web`] - Axum routes, handlers, and the error-to-status mapping
//! - [`config`] - Layered configuration (files + `APP_` environment)
//! - [`logging`] - tracing setup (plain or JSON output)
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use taskman::config::ConfigManager;
//! use taskman::web::{self, state::AppState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ConfigManager::load()?.into_config();
//! let state = AppState::from_config(config).await?;
//! taskman::database::run_migrations(&state.pool).await?;
//! let app = web::create_app(state);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Unit tests run without a database. Integration tests use SQLx native
//! testing (`#[sqlx::test]`) with automatic database isolation per test:
//!
//! ```bash
//! cargo test --lib            # unit tests, no database required
//! DATABASE_URL=... cargo test # all tests
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod scopes;
pub mod web;

pub use error::{Result, TaskmanError};
pub use models::task::{
    NewTask, Task, TaskPage, TaskPageQuery, TaskStatus, TaskUpdate, TaskUpdatePartial,
};
pub use scopes::{Pagination, ScopeBuilder, SearchColumn, SortColumn, SortDirection, TaskFilter};
