/// Task endpoints
///
/// All routes require a Bearer access token; the authenticated user comes
/// from the [`AuthContext`] request extension and every operation is scoped
/// to that user.
///
/// # Endpoints
///
/// - `POST /api/tasks` - create a task
/// - `GET /api/tasks?page&limit&status` - list tasks (paginated)
/// - `GET /api/tasks/{id}` - fetch one task
/// - `PUT /api/tasks/{id}` - partial update
/// - `DELETE /api/tasks/{id}` - delete
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskboard_shared::auth::middleware::AuthContext;
use taskboard_shared::models::pagination::PaginatedResponse;
use taskboard_shared::models::task::{Task, TaskStatus, UpdateTask};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, AppJson},
};

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Title (required, non-empty)
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional priority, defaults to 0
    pub priority: Option<i32>,
}

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// 1-based page number (clamped to >= 1)
    pub page: Option<i64>,

    /// Page size (clamped into [1, 100], default 10)
    pub limit: Option<i64>,

    /// Optional status filter: `todo`, `in_progress`, or `done`
    pub status: Option<String>,
}

/// Partial update request; absent fields keep their stored value
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<i32>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,
}

/// Create a task
///
/// Status is always `todo` on creation.
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `401 Unauthorized`: missing/invalid token
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(req): AppJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let task = state
        .tasks
        .create(auth.user_id, req.title, req.description, req.priority)
        .await?;

    tracing::debug!(user_id = %auth.user_id, task_id = %task.id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// List the authenticated user's tasks, paginated
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<PaginatedResponse<Task>>> {
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(value) => Some(TaskStatus::parse(value).ok_or_else(|| {
            ApiError::BadRequest(format!(
                "invalid status {:?}, expected todo, in_progress, or done",
                value
            ))
        })?),
    };

    let page = state
        .tasks
        .list(
            auth.user_id,
            status,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(10),
        )
        .await?;

    Ok(Json(page))
}

/// Fetch one task
///
/// # Errors
///
/// - `404 Not Found`: no such task
/// - `403 Forbidden`: task belongs to another user
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = state.tasks.get(auth.user_id, task_id).await?;

    Ok(Json(task))
}

/// Partially update a task
///
/// Only fields present in the body change; everything else is untouched.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    AppJson(req): AppJson<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let changes = UpdateTask {
        title: req.title,
        description: req.description,
        status: req.status,
        priority: req.priority,
        due_date: req.due_date,
    };

    let task = state.tasks.update(auth.user_id, task_id, changes).await?;

    Ok(Json(task))
}

/// Delete a task permanently
///
/// # Response
///
/// `204 No Content`
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state.tasks.delete(auth.user_id, task_id).await?;

    tracing::debug!(user_id = %auth.user_id, task_id = %task_id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}
