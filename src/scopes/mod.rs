//! # Query Scopes
//!
//! Chainable, composable query building for the task list operation.
//!
//! ## Design
//!
//! - **Allow-listed columns**: sort and search columns are finite enums;
//!   caller-supplied names are parsed, never spliced into SQL text.
//! - **Bound values**: every filter value and pagination bound goes through
//!   `push_bind`, so the generated SQL contains placeholders only.
//! - **One predicate, two queries**: the scope mirrors its WHERE clause into
//!   a count query, keeping the reported total consistent with the slice.

pub mod pagination;
pub mod task;

use sqlx::PgPool;

pub use pagination::Pagination;
pub use task::{SearchColumn, SortColumn, SortDirection, TaskFilter, TaskScope};

/// Base trait for all scope builders.
pub trait ScopeBuilder<T> {
    /// Build the final query and execute it.
    fn all(
        self,
        pool: &PgPool,
    ) -> impl std::future::Future<Output = Result<Vec<T>, sqlx::Error>> + Send;

    /// Get a single result (first match).
    fn first(
        self,
        pool: &PgPool,
    ) -> impl std::future::Future<Output = Result<Option<T>, sqlx::Error>> + Send;

    /// Count the number of results.
    fn count(
        self,
        pool: &PgPool,
    ) -> impl std::future::Future<Output = Result<i64, sqlx::Error>> + Send;

    /// Check if any results exist.
    fn exists(
        self,
        pool: &PgPool,
    ) -> impl std::future::Future<Output = Result<bool, sqlx::Error>> + Send;
}
