use std::net::SocketAddr;
use std::sync::Arc;

use arena_core::store::{
    InMemorySubmissionStore, InMemorySubscriberStore, SubmissionStore, SubscriberStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_api::config::ServerConfig;
use arena_api::router::build_app_router;
use arena_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arena_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Stores ---
    let (submissions, subscribers): (Arc<dyn SubmissionStore>, Arc<dyn SubscriberStore>) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = arena_db::create_pool(database_url)
                    .await
                    .expect("Failed to connect to database");
                tracing::info!("Database connection pool created");

                arena_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");
                tracing::info!("Database health check passed");

                arena_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");

                let submissions: Arc<dyn SubmissionStore> =
                    Arc::new(arena_db::PgSubmissionStore::new(pool.clone()));
                let subscribers: Arc<dyn SubscriberStore> =
                    Arc::new(arena_db::PgSubscriberStore::new(pool));
                (submissions, subscribers)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory stores (data is not persisted)");
                let submissions: Arc<dyn SubmissionStore> = Arc::new(InMemorySubmissionStore::new());
                let subscribers: Arc<dyn SubscriberStore> = Arc::new(InMemorySubscriberStore::new());
                (submissions, subscribers)
            }
        };

    // --- App state ---
    let state = AppState::new(config.clone(), submissions, subscribers);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
