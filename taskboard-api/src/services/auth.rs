/// Authentication service
///
/// Registration and login. Owns the business rules around credentials:
/// duplicate-email rejection, password hashing, and the deliberate collapsing
/// of "unknown email" and "wrong password" into one error so the API cannot
/// be used to enumerate accounts.
use std::sync::Arc;

use taskboard_shared::auth::jwt::{JwtError, TokenManager};
use taskboard_shared::auth::password::{self, PasswordError};
use taskboard_shared::models::user::{CreateUser, User};
use taskboard_shared::repository::{RepositoryError, UserRepository};

use crate::error::ApiError;

/// Error type for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Registration with an email that is already taken
    #[error("email already registered")]
    EmailAlreadyExists,

    /// Unknown email or wrong password; callers cannot tell which
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing/verification failure
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token issuing failure
    #[error(transparent)]
    Token(#[from] JwtError),

    /// Storage failure
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<AuthServiceError> for ApiError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::EmailAlreadyExists => {
                ApiError::Conflict("email already registered".to_string())
            }
            AuthServiceError::InvalidCredentials => {
                ApiError::Unauthenticated("invalid email or password".to_string())
            }
            AuthServiceError::Password(e) => e.into(),
            AuthServiceError::Token(e) => e.into(),
            AuthServiceError::Repository(e) => e.into(),
        }
    }
}

/// Registration and login operations
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenManager>,
}

impl AuthService {
    /// Creates the service with its repository and token manager.
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenManager>) -> Self {
        Self { users, tokens }
    }

    /// Registers a new user.
    ///
    /// The email is lowercased before the uniqueness check and storage, and
    /// the password is hashed on the blocking pool so request handling is
    /// never stalled by Argon2.
    ///
    /// # Errors
    ///
    /// [`AuthServiceError::EmailAlreadyExists`] when the email is taken.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<User, AuthServiceError> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthServiceError::EmailAlreadyExists);
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
            .await
            .map_err(|e| PasswordError::Hash(e.to_string()))??;

        let user = self
            .users
            .create(CreateUser {
                email,
                name: name.to_string(),
                password_hash,
            })
            .await?;

        Ok(user)
    }

    /// Authenticates a user and issues `(access_token, refresh_token)`.
    ///
    /// # Errors
    ///
    /// [`AuthServiceError::InvalidCredentials`] for an unknown email OR a
    /// wrong password; the two cases are intentionally indistinguishable.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, String), AuthServiceError> {
        let email = normalize_email(email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
            .await
            .map_err(|e| PasswordError::Verify(e.to_string()))??;

        if !valid {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let access_token = self.tokens.generate_access_token(user.id, &user.email)?;
        let refresh_token = self.tokens.generate_refresh_token(user.id)?;

        Ok((access_token, refresh_token))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
