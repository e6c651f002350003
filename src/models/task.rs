//! # Task Model
//!
//! The single persisted entity plus its mutation engine: create, full and
//! partial update, delete, and lookup, each wrapped in exactly one
//! transaction. Storage failures never escape untranslated; see
//! [`crate::error::TaskmanError::storage`].

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, TaskmanError};
use crate::scopes::{Pagination, SortColumn, SortDirection, TaskFilter};

/// Maximum title length in characters, matching the column constraint.
pub const TITLE_MAX_LEN: usize = 100;

const TASK_COLUMNS: &str = "id, title, description, status";

/// Task lifecycle status.
///
/// Stored as the PostgreSQL enum `task_status`; serialized on the wire in
/// lowercase snake_case. The engine does not enforce transition ordering:
/// any status may replace any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Created,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Created
    }
}

impl TaskStatus {
    /// Wire-format name (lowercase snake_case).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Parse a client-supplied filter value, case-insensitively.
    ///
    /// Anything outside the three defined values is a validation error that
    /// names the offending input; no query is executed for such values.
    pub fn parse_filter(input: &str) -> Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(TaskmanError::validation(format!(
                "unknown task status: {input}"
            ))),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task represents one unit of work. Maps to the `tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

/// New Task for creation (without the generated id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl NewTask {
    fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }
}

/// Full replacement payload: every field is overwritten, an absent
/// description overwrites with NULL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
}

impl TaskUpdate {
    fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }
}

/// Partial update payload: only supplied fields are applied, omitted fields
/// stay untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdatePartial {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl TaskUpdatePartial {
    fn validate(&self) -> Result<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    let length = title.chars().count();
    if length == 0 {
        return Err(TaskmanError::validation("title must not be empty"));
    }
    if length > TITLE_MAX_LEN {
        return Err(TaskmanError::validation(format!(
            "title exceeds {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Query parameters for the task list operation.
///
/// `column` and `sort` arrive as untrusted strings and are resolved against
/// the allow-lists in [`crate::scopes`]; `column_search`/`input_search` are
/// both required for filtering to take effect.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskPageQuery {
    #[serde(default = "default_sort_column")]
    pub column: String,
    #[serde(default = "default_sort_direction")]
    pub sort: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub column_search: Option<String>,
    pub input_search: Option<String>,
}

fn default_sort_column() -> String {
    "title".to_string()
}
fn default_sort_direction() -> String {
    "desc".to_string()
}
fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    10
}

impl Default for TaskPageQuery {
    fn default() -> Self {
        Self {
            column: default_sort_column(),
            sort: default_sort_direction(),
            page: default_page(),
            limit: default_limit(),
            column_search: None,
            input_search: None,
        }
    }
}

/// One page of tasks with pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPage {
    pub pages_count: i64,
    pub total: i64,
    pub tasks: Vec<Task>,
}

impl Task {
    /// Look up a task by id. Consumed by the request layer before any
    /// update or delete.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Task>> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| TaskmanError::storage("fetching task", err))
    }

    /// Fetch one sorted, filtered, paginated slice of tasks together with
    /// the total count of records matching the same filter predicate.
    ///
    /// `pages_count` is `ceil(total / limit)`, so an empty match set yields
    /// zero pages.
    pub async fn fetch_page(pool: &PgPool, query: &TaskPageQuery) -> Result<TaskPage> {
        let filter =
            TaskFilter::from_query(query.column_search.as_deref(), query.input_search.as_deref())?;
        let sort_column = SortColumn::parse(&query.column)?;
        let direction = SortDirection::parse(&query.sort);
        let pagination = Pagination::new(query.page, query.limit)?;

        let mut scope = Task::scope();
        if let Some(filter) = &filter {
            scope = scope.filter(filter);
        }
        let (total, tasks) = scope
            .order_by(sort_column, direction)
            .paginate(&pagination)
            .fetch_paged(pool)
            .await
            .map_err(|err| TaskmanError::storage("listing tasks", err))?;

        Ok(TaskPage {
            pages_count: pagination.total_pages(total),
            total,
            tasks,
        })
    }

    /// Create a new task. The storage layer assigns the id; status defaults
    /// to `created` when absent.
    pub async fn create(pool: &PgPool, new_task: NewTask) -> Result<Task> {
        new_task.validate()?;
        let status = new_task.status.unwrap_or_default();

        let mut tx = begin(pool).await?;
        let inserted = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, status) \
             VALUES ($1, $2, $3) \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(status)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(task) => {
                commit(tx, "creating task").await?;
                debug!(task_id = %task.id, "task created");
                Ok(task)
            }
            Err(err) => {
                rollback(tx).await;
                Err(TaskmanError::storage("creating task", err))
            }
        }
    }

    /// Full update: overwrite title, description, and status.
    pub async fn update(pool: &PgPool, id: Uuid, update: TaskUpdate) -> Result<Task> {
        update.validate()?;

        let mut tx = begin(pool).await?;
        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET title = $2, description = $3, status = $4 \
             WHERE id = $1 \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.status)
        .fetch_optional(&mut *tx)
        .await;

        match updated {
            Ok(Some(task)) => {
                commit(tx, "updating task").await?;
                debug!(task_id = %task.id, "task updated");
                Ok(task)
            }
            Ok(None) => {
                rollback(tx).await;
                Err(TaskmanError::NotFound(id))
            }
            Err(err) => {
                rollback(tx).await;
                Err(TaskmanError::storage("updating task", err))
            }
        }
    }

    /// Partial update: only supplied fields are applied.
    ///
    /// Omitted fields keep their stored value via COALESCE; as a
    /// consequence, a partial update cannot set `description` back to NULL
    /// (use a full update for that).
    pub async fn update_partial(
        pool: &PgPool,
        id: Uuid,
        update: TaskUpdatePartial,
    ) -> Result<Task> {
        update.validate()?;

        let mut tx = begin(pool).await?;
        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks \
             SET title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 status = COALESCE($4, status) \
             WHERE id = $1 \
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.status)
        .fetch_optional(&mut *tx)
        .await;

        match updated {
            Ok(Some(task)) => {
                commit(tx, "updating task").await?;
                debug!(task_id = %task.id, "task partially updated");
                Ok(task)
            }
            Ok(None) => {
                rollback(tx).await;
                Err(TaskmanError::NotFound(id))
            }
            Err(err) => {
                rollback(tx).await;
                Err(TaskmanError::storage("updating task", err))
            }
        }
    }

    /// Delete a task. Deleting an id that no longer resolves is NotFound,
    /// both before and after a prior successful delete.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<()> {
        let mut tx = begin(pool).await?;
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                rollback(tx).await;
                Err(TaskmanError::NotFound(id))
            }
            Ok(_) => {
                commit(tx, "deleting task").await?;
                debug!(task_id = %id, "task deleted");
                Ok(())
            }
            Err(err) => {
                rollback(tx).await;
                Err(TaskmanError::storage("deleting task", err))
            }
        }
    }
}

async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>> {
    pool.begin()
        .await
        .map_err(|err| TaskmanError::storage("opening transaction", err))
}

async fn commit(tx: Transaction<'_, Postgres>, operation: &str) -> Result<()> {
    tx.commit()
        .await
        .map_err(|err| TaskmanError::storage(operation, err))
}

async fn rollback(tx: Transaction<'_, Postgres>) {
    if let Err(err) = tx.rollback().await {
        tracing::warn!(error = %err, "rollback failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"completed\"").unwrap(),
            TaskStatus::Completed
        );
    }

    #[test]
    fn status_filter_parse_is_case_insensitive() {
        assert_eq!(
            TaskStatus::parse_filter("CREATED").unwrap(),
            TaskStatus::Created
        );
        assert_eq!(
            TaskStatus::parse_filter("In_Progress").unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            TaskStatus::parse_filter("completed").unwrap(),
            TaskStatus::Completed
        );
    }

    #[test]
    fn status_filter_parse_names_the_offending_value() {
        let err = TaskStatus::parse_filter("bogus").unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn status_defaults_to_created() {
        assert_eq!(TaskStatus::default(), TaskStatus::Created);
    }

    #[test]
    fn new_task_rejects_empty_title() {
        let task = NewTask {
            title: String::new(),
            description: None,
            status: None,
        };
        assert!(matches!(
            task.validate(),
            Err(TaskmanError::Validation(_))
        ));
    }

    #[test]
    fn new_task_rejects_overlong_title() {
        let task = NewTask {
            title: "x".repeat(TITLE_MAX_LEN + 1),
            description: None,
            status: None,
        };
        assert!(task.validate().is_err());
    }

    #[test]
    fn title_length_is_counted_in_characters() {
        // 100 multi-byte characters are within the limit even though the
        // byte length is not.
        let task = NewTask {
            title: "я".repeat(TITLE_MAX_LEN),
            description: None,
            status: None,
        };
        assert!(task.validate().is_ok());
    }

    #[test]
    fn partial_update_with_no_fields_is_valid() {
        assert!(TaskUpdatePartial::default().validate().is_ok());
    }

    #[test]
    fn page_query_defaults_match_the_wire_contract() {
        let query: TaskPageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.column, "title");
        assert_eq!(query.sort, "desc");
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert!(query.column_search.is_none());
        assert!(query.input_search.is_none());
    }
}
