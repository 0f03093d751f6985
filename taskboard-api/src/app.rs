/// Application state and router builder
///
/// Composition happens here: repositories and the token manager are injected
/// into services, services into [`AppState`], and the state into the router.
/// Nothing reaches for a global; `main` (or a test) decides which repository
/// implementations to wire in.
///
/// # Middleware Stack
///
/// Outermost to innermost:
/// 1. Recovery (panics become logged 500s)
/// 2. Logging (`TraceLayer`: method, path, client IP, status, latency)
/// 3. CORS
/// 4. Timeout (per-request deadline from the write timeout)
/// 5. Auth (protected route groups only)
use crate::{
    config::Config,
    middleware::recovery::recovery_layer,
    routes,
    services::{auth::AuthService, tasks::TaskService, users::UserService},
};
use axum::{
    extract::{ConnectInfo, Request},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use taskboard_shared::auth::jwt::TokenManager;
use taskboard_shared::auth::middleware::{auth_middleware, AuthError};
use taskboard_shared::repository::{TaskRepository, UserRepository};
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; every field
/// is an `Arc` or wraps one, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// Token manager (shared read-only)
    pub tokens: Arc<TokenManager>,

    /// Registration/login service
    pub auth: AuthService,

    /// Profile service
    pub users: UserService,

    /// Task service
    pub tasks: TaskService,
}

impl AppState {
    /// Wires services from the configuration and repository implementations.
    pub fn new(
        config: Config,
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
    ) -> Self {
        let config = Arc::new(config);

        let tokens = Arc::new(TokenManager::new(
            config.jwt.secret.clone(),
            chrono_duration(config.jwt.access_ttl),
            chrono_duration(config.jwt.refresh_ttl),
        ));

        Self {
            auth: AuthService::new(users.clone(), tokens.clone()),
            users: UserService::new(users),
            tasks: TaskService::new(tasks),
            tokens,
            config,
        }
    }
}

fn chrono_duration(duration: std::time::Duration) -> chrono::Duration {
    chrono::Duration::seconds(duration.as_secs().min(i64::MAX as u64) as i64)
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// └── /api/
///     ├── /auth/
///     │   ├── POST /register
///     │   └── POST /login
///     ├── /users/
///     │   ├── GET /me           # (authenticated)
///     │   └── PUT /me
///     └── /tasks/               # (authenticated)
///         ├── POST   /
///         ├── GET    /
///         ├── GET    /:id
///         ├── PUT    /:id
///         └── DELETE /:id
/// ```
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public: no token required
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Protected: Bearer access token required
    let user_routes = Router::new()
        .route(
            "/me",
            get(routes::users::get_me).put(routes::users::update_me),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let task_routes = Router::new()
        .route(
            "/",
            post(routes::tasks::create_task).get(routes::tasks::list_tasks),
        )
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/tasks", task_routes);

    let cors = build_cors(&state.config.cors_origins);
    let request_timeout = state.config.server.write_timeout;

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    let client_ip = request
                        .extensions()
                        .get::<ConnectInfo<SocketAddr>>()
                        .map(|ConnectInfo(addr)| addr.ip().to_string())
                        .unwrap_or_else(|| "unknown".to_string());

                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        %client_ip,
                    )
                })
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(recovery_layer())
        .with_state(state)
}

/// Bearer authentication middleware layer
///
/// Validates the access token and injects an `AuthContext` into request
/// extensions; rejects with 401 before the handler otherwise.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    auth_middleware(state.tokens.clone(), req, next).await
}

fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    }
}
