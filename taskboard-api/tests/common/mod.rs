/// Common test utilities for integration tests
///
/// Builds the full router over in-memory repositories so tests exercise the
/// real middleware chain, handlers, and services without a database.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::repository::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use tower::Service as _;

/// Test context wrapping the assembled application
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
}

impl TestContext {
    /// Creates a fresh application over empty in-memory repositories.
    pub fn new() -> Self {
        let state = AppState::new(
            Config::from_env(),
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
        );
        let app = build_router(state.clone());

        TestContext { app, state }
    }

    /// Sends a request and returns `(status, parsed JSON body)`.
    ///
    /// The body value is `Value::Null` for empty responses (e.g. 204).
    pub async fn request(
        &mut self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Registers a user, asserting success.
    pub async fn register(&mut self, email: &str, name: &str, password: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "name": name,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        body
    }

    /// Logs a user in and returns the access token.
    pub async fn login(&mut self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/auth/login",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Registers and logs in, returning the access token.
    pub async fn register_and_login(&mut self, email: &str, password: &str) -> String {
        self.register(email, "Test User", password).await;
        self.login(email, password).await
    }

    /// Creates a task, asserting success, and returns its JSON.
    pub async fn create_task(&mut self, token: &str, title: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                "/api/tasks",
                Some(token),
                Some(serde_json::json!({ "title": title })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "create task failed: {}", body);
        body
    }
}
