/// Repository layer
///
/// Persistence is abstracted behind the [`UserRepository`] and
/// [`TaskRepository`] traits so the service layer never issues raw queries.
/// Concrete implementations are injected through service constructors:
///
/// - [`postgres`]: production implementation over a sqlx `PgPool`
/// - [`memory`]: in-memory implementation backing tests
///
/// Repositories surface exactly two error kinds: [`RepositoryError::NotFound`]
/// and [`RepositoryError::Internal`]. Business-rule errors (ownership,
/// duplicate email) belong to the service layer.
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The requested row does not exist
    #[error("not found")]
    NotFound,

    /// Any storage-level failure (connectivity, constraints, serialization)
    #[error("storage error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            other => RepositoryError::Internal(other.to_string()),
        }
    }
}

/// Filter for listing tasks
///
/// `page` and `limit` arrive pre-clamped by the service layer (`page >= 1`,
/// `1 <= limit <= 100`).
#[derive(Debug, Clone)]
pub struct TaskFilter {
    /// Owning user (always present; tasks are never listed across users)
    pub user_id: Uuid,

    /// Optional status filter
    pub status: Option<TaskStatus>,

    /// 1-based page number
    pub page: u32,

    /// Page size
    pub limit: u32,
}

impl TaskFilter {
    /// Row offset corresponding to `page`/`limit`
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Persistence operations for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user and returns it with generated ID and timestamps.
    async fn create(&self, data: CreateUser) -> Result<User, RepositoryError>;

    /// Looks a user up by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Looks a user up by (lowercased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Applies a partial update; returns the updated user, or `None` if the
    /// user does not exist.
    async fn update(&self, id: Uuid, data: UpdateUser) -> Result<Option<User>, RepositoryError>;

    /// Deletes a user. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

/// Persistence operations for tasks
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task (status `todo`) and returns it.
    async fn create(&self, data: CreateTask) -> Result<Task, RepositoryError>;

    /// Looks a task up by ID, regardless of owner. Ownership is enforced by
    /// the service layer so it can distinguish 404 from 403.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError>;

    /// Returns one page of tasks matching the filter plus the total count
    /// across all pages.
    async fn find_all(&self, filter: &TaskFilter) -> Result<(Vec<Task>, u64), RepositoryError>;

    /// Applies a partial update; returns the updated task, or `None` if the
    /// task does not exist.
    async fn update(&self, id: Uuid, data: UpdateTask) -> Result<Option<Task>, RepositoryError>;

    /// Deletes a task. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_offset() {
        let filter = TaskFilter {
            user_id: Uuid::new_v4(),
            status: None,
            page: 3,
            limit: 10,
        };
        assert_eq!(filter.offset(), 20);
    }

    #[test]
    fn test_filter_offset_first_page() {
        let filter = TaskFilter {
            user_id: Uuid::new_v4(),
            status: None,
            page: 1,
            limit: 25,
        };
        assert_eq!(filter.offset(), 0);
    }

    #[test]
    fn test_sqlx_error_mapping() {
        let err: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, RepositoryError::NotFound));

        let err: RepositoryError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, RepositoryError::Internal(_)));
    }
}
