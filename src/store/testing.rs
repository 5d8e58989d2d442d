//! Instrumented store for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{InMemoryTaskStore, StoreError, TaskStore};
use crate::models::{NewTask, Task, TaskId, TaskUpdate};

/// Wraps an in-memory store, counting calls and optionally failing `find_all`.
#[derive(Debug, Default)]
pub(crate) struct CountingStore {
    pub inner: InMemoryTaskStore,
    find_all_calls: AtomicUsize,
    calls: AtomicUsize,
    /// `find_all` calls numbered from this one on fail
    fail_find_all_from: Option<usize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `find_all` succeeds `successes` times, then fails forever.
    pub fn failing_after(successes: usize) -> Self {
        Self {
            fail_find_all_from: Some(successes),
            ..Self::default()
        }
    }

    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    /// Calls of any operation.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskStore for CountingStore {
    async fn find_all(&self) -> Result<Vec<Task>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let call = self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_find_all_from {
            Some(from) if call >= from => Err(StoreError::Unavailable("connection reset".into())),
            _ => self.inner.find_all().await,
        }
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Task, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(task).await
    }

    async fn update_fields(&self, id: TaskId, update: TaskUpdate) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.update_fields(id, update).await
    }

    async fn delete_by_id(&self, id: TaskId) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_by_id(id).await
    }
}
