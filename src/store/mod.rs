//! Task Store Module
//!
//! Persistence interface for task documents plus the bundled in-memory
//! document store.

mod memory;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewTask, Task, TaskId, TaskUpdate};

pub use memory::InMemoryTaskStore;

// == Store Error ==
/// Failures raised by a task store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No document with this ID
    #[error("no task with id {0}")]
    NotFound(TaskId),

    /// Document exists but does not decode into a task
    #[error("failed to decode task {id}: {source}")]
    Decode {
        id: TaskId,
        #[source]
        source: serde_json::Error,
    },

    /// Document is not a field map
    #[error("task document {0} is not an object")]
    Corrupt(TaskId),

    /// A task could not be encoded into a document
    #[error("failed to encode task: {0}")]
    Encode(#[from] serde_json::Error),

    /// Backend could not be reached or refused the operation
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

// == Task Store ==
/// Document-oriented task persistence.
///
/// Every operation is atomic per document. Nothing here coordinates
/// concurrent writers beyond that.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task in collection order.
    async fn find_all(&self) -> Result<Vec<Task>, StoreError>;

    /// Returns a single task.
    async fn find_by_id(&self, id: TaskId) -> Result<Task, StoreError>;

    /// Stores a new task with a fresh ID and `completed = false`.
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Overwrites the fields present in `update`.
    async fn update_fields(&self, id: TaskId, update: TaskUpdate) -> Result<(), StoreError>;

    /// Removes a task.
    async fn delete_by_id(&self, id: TaskId) -> Result<(), StoreError>;
}
