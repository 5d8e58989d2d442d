//! Task Model
//!
//! The task record, its identifier, and the fieldsets used to create and update it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TaskError;

// == Task ID ==
/// Store-assigned task identifier.
///
/// Backed by a v7 UUID, so identifiers sort in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parses a client-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, TaskError> {
        raw.parse()
            .map_err(|_| TaskError::InvalidId(format!("'{}' is not a valid task ID", raw)))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// == Task ==
/// A task record as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Due date, always held in UTC
    pub due_date: DateTime<Utc>,
    pub completed: bool,
}

impl Task {
    /// True when the task is still open and its due date lies strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date < now
    }
}

// == New Task ==
/// Fields supplied at creation; the store assigns the ID and `completed` starts false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
}

// == Task Update ==
/// A `$set`-style fieldset: present fields are overwritten, absent ones are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    /// Overwrites all four mutable fields.
    pub fn replace_all(
        title: String,
        description: String,
        due_date: DateTime<Utc>,
        completed: bool,
    ) -> Self {
        Self {
            title: Some(title),
            description: Some(description),
            due_date: Some(due_date),
            completed: Some(completed),
        }
    }

    /// Only flips `completed` to true.
    pub fn mark_completed() -> Self {
        Self {
            completed: Some(true),
            ..Self::default()
        }
    }
}
