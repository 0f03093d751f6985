/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - register a new user
/// - `POST /api/auth/login` - login and receive access + refresh tokens
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskboard_shared::models::user::User;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiResult, AppJson},
};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "invalid email format"))]
    pub email: String,

    /// Display name
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,

    /// Password
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
///
/// Deliberately not validated for email shape: a malformed email is just an
/// unknown account and must be indistinguishable from a wrong password.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Short-lived token for API requests
    pub access_token: String,

    /// Long-lived token for minting new access tokens
    pub refresh_token: String,
}

/// Register a new user
///
/// # Response
///
/// `201 Created` with the user (password hash never serialized).
///
/// # Errors
///
/// - `400 Bad Request`: validation failed
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    let user = state
        .auth
        .register(&req.email, &req.name, &req.password)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password
///
/// # Response
///
/// `200 OK` with `{access_token, refresh_token}`.
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials (unknown email and wrong
///   password are not distinguished)
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (access_token, refresh_token) = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password: "secret123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            name: "Alice".to_string(),
            password: "secret123".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());

        let blank_name = RegisterRequest {
            email: "alice@example.com".to_string(),
            name: "".to_string(),
            password: "secret123".to_string(),
        };
        assert!(blank_name.validate().is_err());
    }
}
