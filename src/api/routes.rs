//! API Routes
//!
//! Configures the Axum router with all task service endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, health_handler, list_handler, retrieve_handler,
    stats_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /list` - List all tasks
/// - `GET /retrieve?taskID=` - Retrieve one task
/// - `POST /create` - Create a task
/// - `PUT|POST /update?taskID=` - Replace a task's fields
/// - `DELETE|POST /delete?taskID=` - Delete a task
/// - `GET /stats` - List cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/list", get(list_handler))
        .route("/retrieve", get(retrieve_handler))
        .route("/create", post(create_handler))
        .route("/update", put(update_handler).post(update_handler))
        .route("/delete", delete(delete_handler).post(delete_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
