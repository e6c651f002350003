//! # Database Operations
//!
//! Connection pool construction, startup migrations, and a liveness check.
//! All entity state lives behind the pool; the rest of the crate only ever
//! receives a request-scoped `&PgPool` or a single transaction.

pub mod connection;

pub use connection::{connect, health_check, run_migrations};
