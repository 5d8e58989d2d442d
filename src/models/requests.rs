//! Request DTOs for the task service API
//!
//! Defines the structure of incoming HTTP query strings and request bodies.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::{NewTask, TaskUpdate};

/// Query string carrying the target task (`?taskID=...`)
///
/// A missing parameter is kept as `None` so it fails ID validation
/// rather than query extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskIdQuery {
    #[serde(rename = "taskID")]
    pub task_id: Option<String>,
}

impl TaskIdQuery {
    /// Returns the raw identifier, or an empty string when absent.
    pub fn raw(&self) -> &str {
        self.task_id.as_deref().unwrap_or_default()
    }
}

/// Request body for POST /create
///
/// All three fields are required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    /// Any RFC 3339 offset is accepted and normalized to UTC
    pub due_date: DateTime<Utc>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        NewTask {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
        }
    }
}

/// Request body for PUT /update
///
/// Every field is required; an update always replaces all four.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
}

impl From<UpdateTaskRequest> for TaskUpdate {
    fn from(req: UpdateTaskRequest) -> Self {
        TaskUpdate::replace_all(req.title, req.description, req.due_date, req.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"title": "A", "description": "first", "due_date": "2030-05-01T00:00:00Z"}"#;
        let req: CreateTaskRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "A");
        assert_eq!(req.description, "first");

        let new_task: NewTask = req.into();
        assert_eq!(new_task.due_date.to_rfc3339(), "2030-05-01T00:00:00+00:00");
    }

    #[test]
    fn test_create_request_missing_due_date() {
        let json = r#"{"title": "A", "description": "first"}"#;
        assert!(serde_json::from_str::<CreateTaskRequest>(json).is_err());
    }

    #[test]
    fn test_update_request_requires_completed() {
        let json = r#"{"title": "A", "description": "d", "due_date": "2030-05-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<UpdateTaskRequest>(json).is_err());
    }

    #[test]
    fn test_update_request_into_full_fieldset() {
        let json = r#"{"title": "A", "description": "d", "due_date": "2030-05-01T00:00:00Z", "completed": false}"#;
        let req: UpdateTaskRequest = serde_json::from_str(json).unwrap();
        let update: TaskUpdate = req.into();

        assert_eq!(update.title.as_deref(), Some("A"));
        assert_eq!(update.description.as_deref(), Some("d"));
        assert!(update.due_date.is_some());
        assert_eq!(update.completed, Some(false));
    }

    #[test]
    fn test_task_id_query_raw() {
        let query = TaskIdQuery {
            task_id: Some("abc".to_string()),
        };
        assert_eq!(query.raw(), "abc");
        assert_eq!(TaskIdQuery::default().raw(), "");
    }
}
