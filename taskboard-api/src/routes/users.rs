/// User profile endpoints
///
/// # Endpoints
///
/// - `GET /api/users/me` - current user's profile
/// - `PUT /api/users/me` - partial profile update (name and/or password)
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use taskboard_shared::auth::middleware::AuthContext;
use taskboard_shared::models::user::User;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiResult, AppJson},
};

/// Profile update request; absent fields are left untouched
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: Option<String>,

    /// New password (re-hashed before storage)
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
}

/// Fetch the authenticated user's profile
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<User>> {
    let user = state.users.get(auth.user_id).await?;

    Ok(Json(user))
}

/// Partially update the authenticated user's profile
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = state
        .users
        .update_profile(auth.user_id, req.name, req.password)
        .await?;

    tracing::debug!(user_id = %user.id, "Profile updated");

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile_validation() {
        let valid: UpdateProfileRequest = serde_json::from_str(r#"{"name": "Alice B."}"#).unwrap();
        assert!(valid.validate().is_ok());

        let short_password: UpdateProfileRequest =
            serde_json::from_str(r#"{"password": "short"}"#).unwrap();
        assert!(short_password.validate().is_err());

        let empty: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.validate().is_ok());
    }
}
