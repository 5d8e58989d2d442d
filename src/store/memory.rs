//! In-memory document store for tasks.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;

use super::{StoreError, TaskStore};
use crate::models::{NewTask, Task, TaskId, TaskUpdate};

// == In-Memory Task Store ==
/// Holds each task as a JSON document keyed by ID.
///
/// IDs are time-ordered, so iteration order is creation order. Reads hold the
/// collection guard only for the duration of the call.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    documents: RwLock<BTreeMap<TaskId, Value>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    #[cfg(test)]
    pub(crate) async fn insert_document(&self, id: TaskId, document: Value) {
        self.documents.write().await.insert(id, document);
    }
}

fn decode(id: TaskId, document: &Value) -> Result<Task, StoreError> {
    Task::deserialize(document).map_err(|source| StoreError::Decode { id, source })
}

/// Applies `$set` semantics: only fields present in `update` change.
fn apply_update(id: TaskId, document: &mut Value, update: &TaskUpdate) -> Result<(), StoreError> {
    let Value::Object(fields) = document else {
        return Err(StoreError::Corrupt(id));
    };

    set_field(fields, "title", update.title.as_ref())?;
    set_field(fields, "description", update.description.as_ref())?;
    set_field(fields, "due_date", update.due_date.as_ref())?;
    set_field(fields, "completed", update.completed.as_ref())?;
    Ok(())
}

fn set_field<T: serde::Serialize>(
    fields: &mut Map<String, Value>,
    name: &str,
    value: Option<&T>,
) -> Result<(), StoreError> {
    if let Some(value) = value {
        fields.insert(name.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        let documents = self.documents.read().await;
        documents
            .iter()
            .map(|(id, document)| decode(*id, document))
            .collect()
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Task, StoreError> {
        let documents = self.documents.read().await;
        let document = documents.get(&id).ok_or(StoreError::NotFound(id))?;
        decode(id, document)
    }

    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: TaskId::new(),
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            completed: false,
        };
        let document = serde_json::to_value(&task)?;

        self.documents.write().await.insert(task.id, document);
        debug!(id = %task.id, "Task inserted");
        Ok(task)
    }

    async fn update_fields(&self, id: TaskId, update: TaskUpdate) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let document = documents.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        apply_update(id, document, &update)
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
