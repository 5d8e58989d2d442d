//! Task model plus the request and response DTOs of the HTTP API.

pub mod requests;
pub mod responses;
pub mod task;

// Re-export commonly used types
pub use requests::{CreateTaskRequest, TaskIdQuery, UpdateTaskRequest};
pub use responses::{AckResponse, HealthResponse, StatsResponse};
pub use task::{NewTask, Task, TaskId, TaskUpdate};
