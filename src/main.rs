//! helper_review - Helper Credential Review Backend
//!
//! Serves the admin review workflow: start review, validate, reject, helper
//! resubmission and the pending-review queue.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast::error::RecvError;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helper_review::api::{self, AppState};
use helper_review::config::LogFormat;
use helper_review::db;
use helper_review::handlers::{ReviewHandlers, ReviewPorts};
use helper_review::outbound::{BroadcastEventBus, LogNotifier, SystemClock};
use helper_review::store::{load_seed_file, HelperStore, MemoryHelperStore, PgHelperStore};
use helper_review::Config;

/// Initialize tracing/logging
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "helper_review=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Build the application router
fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", axum::routing::get(health_check))
        .nest("/api/v1", api::create_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Log credential updates for downstream consumers
fn spawn_event_logger(events: &BroadcastEventBus) {
    let mut receiver = events.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(event) => tracing::info!(
                    event_type = event.event_type(),
                    email = event.email(),
                    occurred_at = %event.occurred_at(),
                    "Domain event"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Event logger lagged, {} events skipped", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Starting helper_review server ({})", config.environment);

    let pool = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = db::connect(&config, database_url).await?;
            db::verify_connection(&pool).await?;

            if !db::check_schema(&pool).await? {
                tracing::error!("Database schema is not complete. Please run migrations.");
                return Err(anyhow::anyhow!("Database schema incomplete"));
            }

            tracing::info!("Database connected successfully");
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory helper store");
            None
        }
    };

    let store: Arc<dyn HelperStore> = match (&pool, &config.seed_file) {
        (Some(pool), seed_file) => {
            if seed_file.is_some() {
                tracing::warn!("SEED_FILE ignored, helpers are read from the database");
            }
            Arc::new(PgHelperStore::new(pool.clone()))
        }
        (None, Some(seed_file)) => {
            let records = load_seed_file(seed_file).await?;
            tracing::info!(
                "Seeded in-memory store with {} helpers from {}",
                records.len(),
                seed_file.display()
            );
            Arc::new(MemoryHelperStore::with_records(records))
        }
        (None, None) => {
            tracing::warn!("No SEED_FILE given, the in-memory store starts empty");
            Arc::new(MemoryHelperStore::new())
        }
    };

    let events = BroadcastEventBus::default();
    spawn_event_logger(&events);

    let handlers = ReviewHandlers::new(ReviewPorts {
        store,
        notifier: Arc::new(LogNotifier),
        events: Arc::new(events),
        clock: Arc::new(SystemClock),
        max_retries: config.transition_max_retries,
    });

    let app = build_router(AppState::new(handlers));

    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Cleanup
    tracing::info!("Server shutting down...");
    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database connections closed");
    }

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
