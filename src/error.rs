//! Error types for the task service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

// == Task Error Enum ==
/// Errors surfaced to API callers.
#[derive(Error, Debug)]
pub enum TaskError {
    /// Identifier is not a well-formed task ID
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    /// Request body could not be decoded
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// No task with the given ID
    #[error("Task not found: {0}")]
    NotFound(String),

    /// Persistence layer failure
    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for TaskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => TaskError::NotFound(id.to_string()),
            other => TaskError::Store(other.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let status = match &self {
            TaskError::InvalidId(_) => StatusCode::BAD_REQUEST,
            TaskError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Cache Error Enum ==
/// Errors raised by the cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is longer than the backend accepts
    #[error("Key exceeds maximum length of {max} bytes")]
    KeyTooLong { max: usize },

    /// A field value is larger than the backend accepts
    #[error("Value for field '{field}' exceeds maximum size of {max} bytes")]
    ValueTooLarge { field: String, max: usize },

    /// Cached data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A snapshot field name is not an ordinal task key
    #[error("Unexpected snapshot key: {0}")]
    UnexpectedKey(String),
}

// == Result Type Alias ==
/// Convenience Result type for the task service.
pub type Result<T> = std::result::Result<T, TaskError>;
