/// Bearer-token authentication middleware for Axum
///
/// Protected routes are wrapped with [`auth_middleware`], which extracts the
/// `Authorization: Bearer <token>` header, validates the access token, and
/// injects an [`AuthContext`] into request extensions. Requests that fail any
/// of those steps are rejected with 401 before the handler runs.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use std::sync::Arc;
/// use taskboard_shared::auth::jwt::TokenManager;
/// use taskboard_shared::auth::middleware::{auth_middleware, AuthContext};
///
/// async fn me(Extension(auth): Extension<AuthContext>) -> String {
///     format!("user {}", auth.user_id)
/// }
///
/// fn router(tokens: Arc<TokenManager>) -> Router {
///     Router::new().route("/me", get(me)).layer(middleware::from_fn(
///         move |req, next| auth_middleware(tokens.clone(), req, next),
///     ))
/// }
/// ```
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::jwt::{JwtError, TokenManager};

/// Authentication context added to request extensions
///
/// Handlers extract it with Axum's `Extension` extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (token `sub` claim)
    pub user_id: Uuid,

    /// Email from the access token
    pub email: String,
}

/// Error type for the authentication middleware
///
/// All variants respond 401; the distinction only affects the message and
/// log line.
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header, or not a Bearer scheme
    MissingCredentials,

    /// Token has expired
    ExpiredToken,

    /// Bad signature, malformed token, wrong type
    InvalidToken(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::ExpiredToken,
            other => AuthError::InvalidToken(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingCredentials => "missing or malformed authorization header".to_string(),
            AuthError::ExpiredToken => "token has expired".to_string(),
            AuthError::InvalidToken(msg) => msg,
        };

        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}

/// Validates the Bearer access token and injects [`AuthContext`].
///
/// # Errors
///
/// Returns 401 when the header is missing, the scheme is not Bearer, the
/// signature is invalid, the token has expired, or a refresh token was
/// presented instead of an access token.
pub async fn auth_middleware(
    tokens: Arc<TokenManager>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredentials)?;

    let claims = tokens.validate_access_token(token)?;

    let context = AuthContext {
        user_id: claims.sub,
        // Access tokens always carry an email claim
        email: claims.email.unwrap_or_default(),
    };
    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}
