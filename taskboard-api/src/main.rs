//! # Taskboard API Server
//!
//! Multi-user task management REST service with JWT authentication and
//! owner-scoped task CRUD.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskboard-api
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::Config;
use taskboard_shared::db::{migrations, pool};
use taskboard_shared::repository::postgres::{PgTaskRepository, PgUserRepository};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env();

    let db = pool::create_pool(&config.database).await?;
    migrations::run_migrations(&db).await?;

    let state = AppState::new(
        config.clone(),
        Arc::new(PgUserRepository::new(db.clone())),
        Arc::new(PgTaskRepository::new(db.clone())),
    );
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    // Graceful shutdown: stop accepting connections on signal, wait up to
    // the shutdown timeout for in-flight requests, then force-close.
    let shutdown = CancellationToken::new();
    let server_shutdown = shutdown.clone();

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { server_shutdown.cancelled().await });

    let mut server_handle = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server_handle => {
            // Server stopped on its own (bind/accept failure)
            result??;
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received, draining in-flight requests...");
            shutdown.cancel();

            match tokio::time::timeout(config.server.shutdown_timeout, &mut server_handle).await {
                Ok(result) => result??,
                Err(_) => {
                    tracing::warn!(
                        "Shutdown timeout ({:?}) elapsed, force-closing remaining connections",
                        config.server.shutdown_timeout
                    );
                    server_handle.abort();
                }
            }
        }
    }

    pool::close_pool(db).await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Completes on SIGINT (ctrl-c) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
