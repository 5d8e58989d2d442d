//! API Handlers
//!
//! HTTP request handlers for each task service endpoint.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::error::{Result, TaskError};
use crate::models::{
    AckResponse, CreateTaskRequest, HealthResponse, StatsResponse, Task, TaskIdQuery,
    UpdateTaskRequest,
};
use crate::service::TaskService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: TaskService,
}

impl AppState {
    pub fn new(service: TaskService) -> Self {
        Self { service }
    }
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| TaskError::MalformedRequest(rejection.body_text()))
}

fn task_id(query: std::result::Result<Query<TaskIdQuery>, QueryRejection>) -> Result<TaskIdQuery> {
    query
        .map(|Query(inner)| inner)
        .map_err(|rejection| TaskError::InvalidId(rejection.body_text()))
}

/// Handler for GET /list
///
/// Same array shape whether served from the cache or the store.
pub async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<Task>>> {
    Ok(Json(state.service.list().await?))
}

/// Handler for GET /retrieve?taskID=...
pub async fn retrieve_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<TaskIdQuery>, QueryRejection>,
) -> Result<Json<Task>> {
    let query = task_id(query)?;
    Ok(Json(state.service.retrieve(query.raw()).await?))
}

/// Handler for POST /create
///
/// Responds with the stored task, including its assigned ID.
pub async fn create_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>> {
    let req = body(payload)?;
    Ok(Json(state.service.create(req.into()).await?))
}

/// Handler for PUT /update?taskID=...
///
/// The body is decoded before the ID is checked.
pub async fn update_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<TaskIdQuery>, QueryRejection>,
    payload: std::result::Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<AckResponse>> {
    let req = body(payload)?;
    let query = task_id(query)?;
    let id = state.service.update(query.raw(), req.into()).await?;
    Ok(Json(AckResponse::updated(id)))
}

/// Handler for DELETE /delete?taskID=...
pub async fn delete_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<TaskIdQuery>, QueryRejection>,
) -> Result<Json<AckResponse>> {
    let query = task_id(query)?;
    let id = state.service.delete(query.raw()).await?;
    Ok(Json(AckResponse::deleted(id)))
}

/// Handler for GET /stats
///
/// Returns list cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.cache().stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
