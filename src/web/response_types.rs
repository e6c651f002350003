//! # Web API Error Types
//!
//! Error types specific to the web API and their HTTP response conversions.
//! This is where the domain error taxonomy is mapped to wire statuses; the
//! core itself never sees HTTP.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::error::TaskmanError;

/// Web API specific errors with HTTP status code mappings.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Database operation failed: {operation}")]
    DatabaseError { operation: String },
}

impl ApiError {
    /// Create a BadRequest error with a custom message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a NotFound error naming the missing task id.
    pub fn not_found(task_id: Uuid) -> Self {
        Self::NotFound {
            message: format!("task {task_id} not found"),
        }
    }

    /// Create a DatabaseError with operation context.
    pub fn database_error(operation: impl Into<String>) -> Self {
        Self::DatabaseError {
            operation: operation.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_code, message) = match &self {
            ApiError::NotFound { message } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", message.as_str())
            }

            ApiError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.as_str())
            }

            ApiError::Conflict { message } => {
                (StatusCode::CONFLICT, "CONFLICT", message.as_str())
            }

            ApiError::DatabaseError { operation } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                operation.as_str(),
            ),
        };

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message
            }
        });

        (status_code, Json(error_response)).into_response()
    }
}

/// Translate core errors into their wire-level counterparts.
impl From<TaskmanError> for ApiError {
    fn from(err: TaskmanError) -> Self {
        match err {
            TaskmanError::Validation(message) => ApiError::BadRequest { message },
            TaskmanError::NotFound(id) => ApiError::not_found(id),
            TaskmanError::Conflict(message) => ApiError::Conflict { message },
            TaskmanError::Internal(message) => ApiError::DatabaseError { operation: message },
        }
    }
}

/// Result type alias for web API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn error_kinds_map_to_wire_statuses() {
        assert_eq!(
            status_of(TaskmanError::validation("bad input").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(TaskmanError::NotFound(Uuid::new_v4()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(TaskmanError::Conflict("duplicate".to_string()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(TaskmanError::Internal("boom".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_body_names_the_id() {
        let id = Uuid::new_v4();
        let err: ApiError = TaskmanError::NotFound(id).into();
        assert!(err.to_string().contains(&id.to_string()));
    }
}
