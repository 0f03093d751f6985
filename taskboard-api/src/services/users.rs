/// User profile service
///
/// Profile reads and edits for the authenticated user. Accounts are never
/// hard-deleted through the API.
use std::sync::Arc;

use taskboard_shared::auth::password::{self, PasswordError};
use taskboard_shared::models::user::{UpdateUser, User};
use taskboard_shared::repository::{RepositoryError, UserRepository};
use uuid::Uuid;

use crate::error::ApiError;

/// Error type for profile operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// User does not exist (stale token after account removal)
    #[error("user not found")]
    NotFound,

    /// Password hashing failure
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Storage failure
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::NotFound => ApiError::NotFound("user not found".to_string()),
            UserServiceError::Password(e) => e.into(),
            UserServiceError::Repository(e) => e.into(),
        }
    }
}

/// Profile operations for the authenticated user
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates the service with its repository.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Returns the user's profile.
    pub async fn get(&self, user_id: Uuid) -> Result<User, UserServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserServiceError::NotFound)
    }

    /// Applies a partial profile update.
    ///
    /// A new password is re-hashed on the blocking pool before storage; the
    /// raw password never reaches the repository.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<User, UserServiceError> {
        let password_hash = match password {
            Some(password) => Some(
                tokio::task::spawn_blocking(move || password::hash_password(&password))
                    .await
                    .map_err(|e| PasswordError::Hash(e.to_string()))??,
            ),
            None => None,
        };

        self.users
            .update(
                user_id,
                UpdateUser {
                    name,
                    password_hash,
                },
            )
            .await?
            .ok_or(UserServiceError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_shared::models::user::CreateUser;
    use taskboard_shared::repository::memory::InMemoryUserRepository;

    async fn service_with_user() -> (UserService, User) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = repo
            .create(CreateUser {
                email: "alice@example.com".to_string(),
                name: "Alice".to_string(),
                password_hash: password::hash_password("secret123").unwrap(),
            })
            .await
            .unwrap();

        (UserService::new(repo), user)
    }

    #[tokio::test]
    async fn test_get_profile() {
        let (svc, user) = service_with_user().await;

        let profile = svc.get(user.id).await.unwrap();
        assert_eq!(profile.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let (svc, _) = service_with_user().await;

        let result = svc.get(Uuid::new_v4()).await;
        assert!(matches!(result, Err(UserServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_name_only() {
        let (svc, user) = service_with_user().await;

        let updated = svc
            .update_profile(user.id, Some("Alice B.".to_string()), None)
            .await
            .unwrap();

        assert_eq!(updated.name, "Alice B.");
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn test_update_password_rehashes() {
        let (svc, user) = service_with_user().await;

        let updated = svc
            .update_profile(user.id, None, Some("new-password".to_string()))
            .await
            .unwrap();

        assert_ne!(updated.password_hash, user.password_hash);
        assert_ne!(updated.password_hash, "new-password");
        assert!(password::verify_password("new-password", &updated.password_hash).unwrap());
    }
}
