//! # Structured Error Handling
//!
//! Domain error taxonomy shared by the query builder and the mutation engine.
//! Storage-layer failures are translated here; no raw `sqlx::Error` crosses
//! the model boundary.

use thiserror::Error;
use uuid::Uuid;

/// Error kinds produced by the task core.
///
/// The web layer maps each kind to a wire status (see `web::response_types`);
/// the core itself is transport-agnostic.
#[derive(Debug, Error)]
pub enum TaskmanError {
    /// Malformed input, rejected before any storage round-trip.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced task does not exist.
    #[error("task {0} not found")]
    NotFound(Uuid),

    /// Storage-level integrity violation (unique, FK, not-null, check),
    /// reported after the in-flight transaction was rolled back.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other storage failure, reported after rollback.
    #[error("storage failure: {0}")]
    Internal(String),
}

impl TaskmanError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Translate a storage error into the domain taxonomy.
    ///
    /// Constraint-kind database errors become [`TaskmanError::Conflict`];
    /// everything else is [`TaskmanError::Internal`]. The underlying driver
    /// error is logged, not propagated, so callers only ever see the
    /// translated kind plus an operation description.
    pub fn storage(operation: &str, err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        let is_integrity = match &err {
            sqlx::Error::Database(db) => matches!(
                db.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        };

        if is_integrity {
            tracing::error!(error = %err, operation, "integrity violation");
            Self::Conflict(format!("integrity violation while {operation}"))
        } else {
            tracing::error!(error = %err, operation, "storage failure");
            Self::Internal(format!("storage failure while {operation}"))
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_input() {
        let err = TaskmanError::validation("unknown task status: bogus");
        assert_eq!(
            err.to_string(),
            "validation error: unknown task status: bogus"
        );
    }

    #[test]
    fn not_found_message_names_the_id() {
        let id = Uuid::new_v4();
        let err = TaskmanError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn non_database_errors_translate_to_internal() {
        let err = TaskmanError::storage("creating task", sqlx::Error::RowNotFound);
        assert!(matches!(err, TaskmanError::Internal(_)));
        assert!(err.to_string().contains("creating task"));
    }
}
