/// In-memory repository implementations
///
/// Behavior-equivalent stand-ins for the PostgreSQL repositories, backed by
/// `HashMap`s behind a `tokio::sync::RwLock`. They power service and router
/// tests that need real repository semantics without a database, the same
/// way a mock adapter stands in for a real execution backend.
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RepositoryError, TaskFilter, TaskRepository, UserRepository};
use crate::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::models::user::{CreateUser, UpdateUser, User};

/// [`UserRepository`] backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, data: CreateUser) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;

        // Mirrors the unique constraint on users.email
        if users.values().any(|u| u.email == data.email) {
            return Err(RepositoryError::Internal(format!(
                "duplicate key value violates unique constraint: email {}",
                data.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            name: data.name,
            password_hash: data.password_hash,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update(&self, id: Uuid, data: UpdateUser) -> Result<Option<User>, RepositoryError> {
        let mut users = self.users.write().await;

        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            user.name = name;
        }
        if let Some(password_hash) = data.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}

/// [`TaskRepository`] backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, data: CreateTask) -> Result<Task, RepositoryError> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            status: TaskStatus::Todo,
            priority: data.priority,
            due_date: None,
            created_at: now,
            updated_at: now,
        };

        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Task>, RepositoryError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn find_all(&self, filter: &TaskFilter) -> Result<(Vec<Task>, u64), RepositoryError> {
        let tasks = self.tasks.read().await;

        let mut matching: Vec<Task> = tasks
            .values()
            .filter(|t| t.user_id == filter.user_id)
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();

        // Same ordering as the SQL implementation
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let page: Vec<Task> = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn update(&self, id: Uuid, data: UpdateTask) -> Result<Option<Task>, RepositoryError> {
        let mut tasks = self.tasks.write().await;

        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = Some(description);
        }
        if let Some(status) = data.status {
            task.status = status;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        if let Some(due_date) = data.due_date {
            task.due_date = Some(due_date);
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            name: "Test User".to_string(),
            password_hash: "$argon2id$hash".to_string(),
        }
    }

    fn new_task(user_id: Uuid, title: &str) -> CreateTask {
        CreateTask {
            user_id,
            title: title.to_string(),
            description: None,
            priority: 0,
        }
    }

    #[tokio::test]
    async fn test_user_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("alice@example.com")).await.unwrap();

        let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "alice@example.com");

        let by_email = repo
            .find_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);

        assert!(repo
            .find_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_user_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice@example.com")).await.unwrap();

        let result = repo.create(new_user("alice@example.com")).await;
        assert!(matches!(result, Err(RepositoryError::Internal(_))));
    }

    #[tokio::test]
    async fn test_user_partial_update() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("alice@example.com")).await.unwrap();

        let updated = repo
            .update(
                user.id,
                UpdateUser {
                    name: Some("Alice B.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Alice B.");
        assert_eq!(updated.password_hash, user.password_hash);
        assert_eq!(updated.email, user.email);
    }

    #[tokio::test]
    async fn test_user_delete() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("alice@example.com")).await.unwrap();

        assert!(repo.delete(user.id).await.unwrap());
        assert!(!repo.delete(user.id).await.unwrap());
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_task_create_defaults() {
        let repo = InMemoryTaskRepository::new();
        let task = repo.create(new_task(Uuid::new_v4(), "write spec")).await.unwrap();

        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, 0);
        assert!(task.due_date.is_none());
    }

    #[tokio::test]
    async fn test_task_find_all_filters_by_user_and_status() {
        let repo = InMemoryTaskRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let t1 = repo.create(new_task(alice, "one")).await.unwrap();
        repo.create(new_task(alice, "two")).await.unwrap();
        repo.create(new_task(bob, "other")).await.unwrap();

        repo.update(
            t1.id,
            UpdateTask {
                status: Some(TaskStatus::Done),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let (all, total) = repo
            .find_all(&TaskFilter {
                user_id: alice,
                status: None,
                page: 1,
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(all.len(), 2);

        let (done, total) = repo
            .find_all(&TaskFilter {
                user_id: alice,
                status: Some(TaskStatus::Done),
                page: 1,
                limit: 10,
            })
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(done[0].id, t1.id);
    }

    #[tokio::test]
    async fn test_task_pagination_totals() {
        let repo = InMemoryTaskRepository::new();
        let user_id = Uuid::new_v4();

        for i in 0..23 {
            repo.create(new_task(user_id, &format!("task {}", i)))
                .await
                .unwrap();
        }

        let filter = |page| TaskFilter {
            user_id,
            status: None,
            page,
            limit: 10,
        };

        let (page1, total) = repo.find_all(&filter(1)).await.unwrap();
        assert_eq!(total, 23);
        assert_eq!(page1.len(), 10);

        let (page3, _) = repo.find_all(&filter(3)).await.unwrap();
        assert_eq!(page3.len(), 3);

        let (page4, _) = repo.find_all(&filter(4)).await.unwrap();
        assert!(page4.is_empty());
    }

    #[tokio::test]
    async fn test_task_partial_update_leaves_other_fields() {
        let repo = InMemoryTaskRepository::new();
        let task = repo
            .create(CreateTask {
                user_id: Uuid::new_v4(),
                title: "original".to_string(),
                description: Some("keep me".to_string()),
                priority: 5,
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                task.id,
                UpdateTask {
                    status: Some(TaskStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, TaskStatus::InProgress);
        assert_eq!(updated.title, "original");
        assert_eq!(updated.description.as_deref(), Some("keep me"));
        assert_eq!(updated.priority, 5);
    }

    #[tokio::test]
    async fn test_task_update_missing_returns_none() {
        let repo = InMemoryTaskRepository::new();
        let result = repo
            .update(Uuid::new_v4(), UpdateTask::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
