//! # Task Management Handlers
//!
//! HTTP handlers for task creation, retrieval, update, deletion, and
//! listing. Handlers parse the wire request, delegate to the model layer,
//! and serialize the result; every error arrives here already translated.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::task::{
    NewTask, Task, TaskPage, TaskPageQuery, TaskUpdate, TaskUpdatePartial,
};
use crate::web::response_types::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Resolve a path id to a task or a NOT_FOUND response. Runs before every
/// update/delete, mirroring the lookup collaborator in the design.
async fn task_by_id(state: &AppState, task_id: Uuid) -> ApiResult<Task> {
    Task::find_by_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| ApiError::not_found(task_id))
}

/// Create a new task: POST /api/v1/tasks/create
pub async fn create_task(
    State(state): State<AppState>,
    Json(new_task): Json<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    info!(title = %new_task.title, "creating task");
    let task = Task::create(&state.pool, new_task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get task details: GET /api/v1/tasks/{task_id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    debug!(%task_id, "fetching task");
    let task = task_by_id(&state, task_id).await?;
    Ok(Json(task))
}

/// Fully update a task: PUT /api/v1/tasks/{task_id}
///
/// Overwrites title, description, and status; an absent description
/// overwrites with NULL.
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(update): Json<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    info!(%task_id, "updating task");
    task_by_id(&state, task_id).await?;
    let task = Task::update(&state.pool, task_id, update).await?;
    Ok(Json(task))
}

/// Partially update a task: PATCH /api/v1/tasks/{task_id}
///
/// Applies only the supplied fields; omitted fields stay untouched.
pub async fn update_partial_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(update): Json<TaskUpdatePartial>,
) -> ApiResult<Json<Task>> {
    info!(%task_id, "partially updating task");
    task_by_id(&state, task_id).await?;
    let task = Task::update_partial(&state.pool, task_id, update).await?;
    Ok(Json(task))
}

/// Delete a task: DELETE /api/v1/tasks/{task_id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    info!(%task_id, "deleting task");
    task_by_id(&state, task_id).await?;
    Task::delete(&state.pool, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List tasks with sorting, filtering, and pagination: GET /api/v1/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskPageQuery>,
) -> ApiResult<Json<TaskPage>> {
    debug!(?query, "listing tasks");
    let page = Task::fetch_page(&state.pool, &query).await?;
    Ok(Json(page))
}
