//! # Task Scopes
//!
//! Query scope for the Task model: filtering, ordering, and pagination over
//! untrusted, dynamically-named parameters.
//!
//! Every caller-supplied column name is resolved through an explicit
//! allow-list enum before it comes anywhere near SQL text, and every filter
//! value is a bound parameter. The scope keeps a count query and a row query
//! in lockstep so the total and the slice are always computed against the
//! same filter predicate.

use sqlx::{PgPool, Postgres, QueryBuilder};

use super::pagination::Pagination;
use super::ScopeBuilder;
use crate::error::{Result, TaskmanError};
use crate::models::task::{Task, TaskStatus};

const SELECT_TASKS: &str = "SELECT tasks.id, tasks.title, tasks.description, tasks.status FROM tasks";
const SELECT_COUNT: &str = "SELECT COUNT(*) FROM tasks";

/// Sortable task attributes (allow-list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Title,
    Description,
    Status,
}

impl SortColumn {
    /// Resolve a caller-supplied column name. Unrecognized names are a
    /// validation error, never passed through to storage.
    pub fn parse(input: &str) -> Result<Self> {
        match input {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "status" => Ok(Self::Status),
            _ => Err(TaskmanError::validation(format!(
                "unknown sort column: {input}"
            ))),
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            Self::Id => "tasks.id",
            Self::Title => "tasks.title",
            Self::Description => "tasks.description",
            Self::Status => "tasks.status",
        }
    }
}

/// Sort direction. Anything that is not `desc` (case-insensitive) sorts
/// ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(input: &str) -> Self {
        if input.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Searchable task attributes (allow-list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchColumn {
    Title,
    Description,
    Status,
}

impl SearchColumn {
    pub fn parse(input: &str) -> Result<Self> {
        match input {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "status" => Ok(Self::Status),
            _ => Err(TaskmanError::validation(format!(
                "unknown search column: {input}"
            ))),
        }
    }
}

/// A validated filter predicate.
///
/// Text columns match by prefix with the store's default text comparison
/// (PostgreSQL `LIKE` is case-sensitive); status matches exactly after a
/// case-insensitive parse of the input.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskFilter {
    TitlePrefix(String),
    DescriptionPrefix(String),
    Status(TaskStatus),
}

impl TaskFilter {
    /// Build a filter from the raw `column_search`/`input_search` pair.
    ///
    /// Absence of either means "no filtering". An unknown column or an
    /// unknown status value fails validation here, before any storage
    /// round-trip.
    pub fn from_query(column: Option<&str>, value: Option<&str>) -> Result<Option<Self>> {
        let (Some(column), Some(value)) = (column, value) else {
            return Ok(None);
        };
        let filter = match SearchColumn::parse(column)? {
            SearchColumn::Title => Self::TitlePrefix(value.to_string()),
            SearchColumn::Description => Self::DescriptionPrefix(value.to_string()),
            SearchColumn::Status => Self::Status(TaskStatus::parse_filter(value)?),
        };
        Ok(Some(filter))
    }
}

/// Query builder for Task scopes.
pub struct TaskScope {
    query: QueryBuilder<'static, Postgres>,
    count_query: QueryBuilder<'static, Postgres>,
    has_conditions: bool,
}

impl Task {
    /// Start building a scoped query.
    pub fn scope() -> TaskScope {
        TaskScope {
            query: QueryBuilder::new(SELECT_TASKS),
            count_query: QueryBuilder::new(SELECT_COUNT),
            has_conditions: false,
        }
    }
}

impl TaskScope {
    /// Add a WHERE fragment to both the row query and the count query, so
    /// the slice and the total always share one predicate.
    fn add_condition(&mut self, fragment: &str) {
        let keyword = if self.has_conditions { " AND " } else { " WHERE " };
        self.has_conditions = true;
        self.query.push(keyword);
        self.query.push(fragment);
        self.count_query.push(keyword);
        self.count_query.push(fragment);
    }

    /// Apply a validated filter predicate.
    pub fn filter(mut self, filter: &TaskFilter) -> Self {
        match filter {
            TaskFilter::TitlePrefix(value) => {
                self.add_condition("tasks.title LIKE ");
                let pattern = format!("{value}%");
                self.query.push_bind(pattern.clone());
                self.count_query.push_bind(pattern);
            }
            TaskFilter::DescriptionPrefix(value) => {
                self.add_condition("tasks.description LIKE ");
                let pattern = format!("{value}%");
                self.query.push_bind(pattern.clone());
                self.count_query.push_bind(pattern);
            }
            TaskFilter::Status(status) => {
                self.add_condition("tasks.status = ");
                self.query.push_bind(*status);
                self.count_query.push_bind(*status);
            }
        }
        self
    }

    /// Add ordering by an allow-listed column. Ordering never applies to the
    /// count query.
    pub fn order_by(mut self, column: SortColumn, direction: SortDirection) -> Self {
        self.query
            .push(format!(" ORDER BY {} {}", column.as_sql(), direction.as_sql()));
        self
    }

    /// Add LIMIT/OFFSET from validated pagination.
    pub fn paginate(mut self, pagination: &Pagination) -> Self {
        self.query.push(" LIMIT ");
        self.query.push_bind(i64::from(pagination.limit()));
        self.query.push(" OFFSET ");
        self.query.push_bind(i64::from(pagination.offset()));
        self
    }

    /// Execute the count query and the row query, in that order, returning
    /// `(total, rows)` computed against the same predicate.
    pub async fn fetch_paged(mut self, pool: &PgPool) -> std::result::Result<(i64, Vec<Task>), sqlx::Error> {
        let (total,): (i64,) = self
            .count_query
            .build_query_as()
            .fetch_one(pool)
            .await?;
        let tasks = self.query.build_query_as::<Task>().fetch_all(pool).await?;
        Ok((total, tasks))
    }
}

impl ScopeBuilder<Task> for TaskScope {
    async fn all(mut self, pool: &PgPool) -> std::result::Result<Vec<Task>, sqlx::Error> {
        self.query.build_query_as::<Task>().fetch_all(pool).await
    }

    async fn first(mut self, pool: &PgPool) -> std::result::Result<Option<Task>, sqlx::Error> {
        self.query.push(" LIMIT 1");
        self.query
            .build_query_as::<Task>()
            .fetch_optional(pool)
            .await
    }

    async fn count(mut self, pool: &PgPool) -> std::result::Result<i64, sqlx::Error> {
        let (total,): (i64,) = self
            .count_query
            .build_query_as()
            .fetch_one(pool)
            .await?;
        Ok(total)
    }

    async fn exists(mut self, pool: &PgPool) -> std::result::Result<bool, sqlx::Error> {
        self.query.push(" LIMIT 1");
        let result = self
            .query
            .build_query_as::<Task>()
            .fetch_optional(pool)
            .await?;
        Ok(result.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_scope_selects_all_columns() {
        let scope = Task::scope();
        assert_eq!(scope.query.sql(), SELECT_TASKS);
        assert_eq!(scope.count_query.sql(), SELECT_COUNT);
    }

    #[test]
    fn title_prefix_filter_binds_the_pattern() {
        let scope = Task::scope().filter(&TaskFilter::TitlePrefix("abc".to_string()));
        assert_eq!(
            scope.query.sql(),
            format!("{SELECT_TASKS} WHERE tasks.title LIKE $1")
        );
        assert_eq!(
            scope.count_query.sql(),
            format!("{SELECT_COUNT} WHERE tasks.title LIKE $1")
        );
    }

    #[test]
    fn status_filter_applies_to_both_queries() {
        let scope = Task::scope().filter(&TaskFilter::Status(TaskStatus::InProgress));
        assert_eq!(
            scope.query.sql(),
            format!("{SELECT_TASKS} WHERE tasks.status = $1")
        );
        assert_eq!(
            scope.count_query.sql(),
            format!("{SELECT_COUNT} WHERE tasks.status = $1")
        );
    }

    #[test]
    fn ordering_applies_to_the_row_query_only() {
        let scope = Task::scope().order_by(SortColumn::Title, SortDirection::Desc);
        assert_eq!(
            scope.query.sql(),
            format!("{SELECT_TASKS} ORDER BY tasks.title DESC")
        );
        assert_eq!(scope.count_query.sql(), SELECT_COUNT);
    }

    #[test]
    fn pagination_binds_limit_and_offset_after_the_filter() {
        let pagination = Pagination::new(2, 5).unwrap();
        let scope = Task::scope()
            .filter(&TaskFilter::DescriptionPrefix("x".to_string()))
            .order_by(SortColumn::Id, SortDirection::Asc)
            .paginate(&pagination);
        assert_eq!(
            scope.query.sql(),
            format!(
                "{SELECT_TASKS} WHERE tasks.description LIKE $1 \
                 ORDER BY tasks.id ASC LIMIT $2 OFFSET $3"
            )
        );
    }

    #[test]
    fn sort_column_rejects_unknown_names() {
        let err = SortColumn::parse("ctid").unwrap_err();
        assert!(err.to_string().contains("ctid"));
        // A classic injection probe never reaches SQL text.
        assert!(SortColumn::parse("title; DROP TABLE tasks").is_err());
    }

    #[test]
    fn sort_direction_defaults_to_ascending() {
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
    }

    #[test]
    fn filter_requires_both_column_and_value() {
        assert_eq!(TaskFilter::from_query(None, None).unwrap(), None);
        assert_eq!(TaskFilter::from_query(Some("title"), None).unwrap(), None);
        assert_eq!(TaskFilter::from_query(None, Some("abc")).unwrap(), None);
    }

    #[test]
    fn filter_rejects_unknown_search_column() {
        let err = TaskFilter::from_query(Some("id"), Some("abc")).unwrap_err();
        assert!(matches!(err, TaskmanError::Validation(_)));
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn unknown_status_fails_before_any_query_is_built() {
        let err = TaskFilter::from_query(Some("status"), Some("bogus")).unwrap_err();
        assert!(matches!(err, TaskmanError::Validation(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn status_filter_parses_case_insensitively() {
        assert_eq!(
            TaskFilter::from_query(Some("status"), Some("COMPLETED")).unwrap(),
            Some(TaskFilter::Status(TaskStatus::Completed))
        );
    }
}
