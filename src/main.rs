//! Task Manager - A task management HTTP service
//!
//! Serves CRUD over task records with a read-through list cache and a
//! background overdue-task sweeper.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_manager::cache::{CacheStore, ListCache};
use task_manager::clock::{Clock, SystemClock};
use task_manager::store::{InMemoryTaskStore, TaskStore};
use task_manager::{
    create_router, spawn_cleanup_task, spawn_overdue_sweeper, AppState, Config, TaskService,
};

/// Main entry point for the task manager service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the task store, the list cache, and the service over them
/// 4. Start the overdue sweeper and the cache cleanup task
/// 5. Serve the Axum router on the configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_manager=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Task Manager");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cache_ttl={}s, cleanup_interval={}s, sweep_interval={}ms",
        config.server_port, config.cache_ttl, config.cleanup_interval, config.sweep_interval_ms
    );

    // One shared handle per dependency, injected everywhere it is used
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
    let cache = ListCache::new(
        Arc::new(RwLock::new(CacheStore::new())),
        clock.clone(),
        config.cache_ttl(),
    );
    let service = TaskService::new(store.clone(), cache.clone());
    info!("Task store and list cache initialized");

    let background = BackgroundTasks {
        sweeper: spawn_overdue_sweeper(store, clock, config.sweep_interval()),
        cleanup: spawn_cleanup_task(cache, config.cleanup_interval()),
    };
    info!("Background tasks started");

    let app = create_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(background))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

struct BackgroundTasks {
    sweeper: JoinHandle<task_manager::store::StoreError>,
    cleanup: JoinHandle<()>,
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the background tasks and allows graceful shutdown.
async fn shutdown_signal(background: BackgroundTasks) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if background.sweeper.is_finished() {
        warn!("Overdue sweeper had already stopped");
    }
    background.sweeper.abort();
    background.cleanup.abort();
    warn!("Background tasks aborted");
}
