/// Task service
///
/// CRUD over tasks with ownership enforcement and pagination assembly.
/// Ownership is checked on every read, update, and delete: a task that
/// exists but belongs to someone else yields `Forbidden`, never the task.
use std::sync::Arc;

use taskboard_shared::models::pagination::PaginatedResponse;
use taskboard_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use taskboard_shared::repository::{RepositoryError, TaskFilter, TaskRepository};
use uuid::Uuid;

use crate::error::ApiError;

/// Page size used when the requested limit is out of range
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound for the requested page size
const MAX_PAGE_SIZE: u32 = 100;

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Task does not exist
    #[error("task not found")]
    NotFound,

    /// Task exists but belongs to a different user
    #[error("task belongs to another user")]
    NotOwner,

    /// Title missing or blank
    #[error("title must not be empty")]
    InvalidTitle,

    /// Storage failure
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::NotFound => ApiError::NotFound("task not found".to_string()),
            TaskServiceError::NotOwner => {
                ApiError::Forbidden("task belongs to another user".to_string())
            }
            TaskServiceError::InvalidTitle => {
                ApiError::BadRequest("title must not be empty".to_string())
            }
            TaskServiceError::Repository(e) => e.into(),
        }
    }
}

/// Task CRUD with owner scoping
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
}

impl TaskService {
    /// Creates the service with its repository.
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// Creates a task for a user. Status is always `todo`; priority defaults
    /// to 0 when not supplied.
    pub async fn create(
        &self,
        user_id: Uuid,
        title: String,
        description: Option<String>,
        priority: Option<i32>,
    ) -> Result<Task, TaskServiceError> {
        if title.trim().is_empty() {
            return Err(TaskServiceError::InvalidTitle);
        }

        let task = self
            .tasks
            .create(CreateTask {
                user_id,
                title,
                description,
                priority: priority.unwrap_or(0),
            })
            .await?;

        Ok(task)
    }

    /// Fetches a task, enforcing ownership.
    ///
    /// # Errors
    ///
    /// [`TaskServiceError::NotFound`] when the task does not exist,
    /// [`TaskServiceError::NotOwner`] when it is owned by someone else. The
    /// existence check runs first so owners get accurate 404s; other callers
    /// get 403 for tasks that do exist.
    pub async fn get(&self, user_id: Uuid, task_id: Uuid) -> Result<Task, TaskServiceError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::NotFound)?;

        if task.user_id != user_id {
            return Err(TaskServiceError::NotOwner);
        }

        Ok(task)
    }

    /// Lists a user's tasks, optionally filtered by status.
    ///
    /// `page` is clamped to at least 1; `limit` outside `[1, 100]` falls back
    /// to 10.
    pub async fn list(
        &self,
        user_id: Uuid,
        status: Option<TaskStatus>,
        page: i64,
        limit: i64,
    ) -> Result<PaginatedResponse<Task>, TaskServiceError> {
        let page = page.max(1).min(i64::from(u32::MAX)) as u32;
        let limit = if (1..=i64::from(MAX_PAGE_SIZE)).contains(&limit) {
            limit as u32
        } else {
            DEFAULT_PAGE_SIZE
        };

        let filter = TaskFilter {
            user_id,
            status,
            page,
            limit,
        };

        let (tasks, total) = self.tasks.find_all(&filter).await?;

        Ok(PaginatedResponse::new(tasks, total, page, limit))
    }

    /// Applies a partial update to one of the user's tasks.
    ///
    /// Only supplied fields change; the ownership check is inherited from
    /// [`TaskService::get`].
    pub async fn update(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        changes: UpdateTask,
    ) -> Result<Task, TaskServiceError> {
        self.get(user_id, task_id).await?;

        if let Some(title) = &changes.title {
            if title.trim().is_empty() {
                return Err(TaskServiceError::InvalidTitle);
            }
        }

        let task = self
            .tasks
            .update(task_id, changes)
            .await?
            .ok_or(TaskServiceError::NotFound)?;

        Ok(task)
    }

    /// Deletes one of the user's tasks. Deletion is permanent.
    pub async fn delete(&self, user_id: Uuid, task_id: Uuid) -> Result<(), TaskServiceError> {
        self.get(user_id, task_id).await?;

        self.tasks.delete(task_id).await?;

        Ok(())
    }
}
