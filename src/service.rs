//! Task Service
//!
//! Request-shaped orchestration over the task store and the list cache.
//! Reads of the full list are cache-first; every write goes to the store
//! only, so a cached list may lag behind writes until the snapshot expires.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::ListCache;
use crate::error::Result;
use crate::models::{NewTask, Task, TaskId, TaskUpdate};
use crate::store::TaskStore;

// == Task Service ==
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    cache: ListCache,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, cache: ListCache) -> Self {
        Self { store, cache }
    }

    pub fn store(&self) -> Arc<dyn TaskStore> {
        self.store.clone()
    }

    pub fn cache(&self) -> &ListCache {
        &self.cache
    }

    // == List ==
    /// Returns all tasks, from the cached snapshot when one is live.
    ///
    /// On a miss the store is scanned and the snapshot repopulated. A failed
    /// population is logged; the fetched list is still returned.
    pub async fn list(&self) -> Result<Vec<Task>> {
        if let Some(snapshot) = self.cache.get().await {
            match snapshot.into_tasks() {
                Ok(tasks) => {
                    debug!(tasks = tasks.len(), "Task list served from cache");
                    return Ok(tasks);
                }
                Err(err) => warn!(error = %err, "Discarding unreadable task list snapshot"),
            }
        }

        let tasks = self.store.find_all().await?;
        debug!(tasks = tasks.len(), "Task list loaded from store");

        if let Err(err) = self.cache.populate(&tasks).await {
            warn!(error = %err, "Failed to cache task list");
        }

        Ok(tasks)
    }

    // == Retrieve ==
    pub async fn retrieve(&self, raw_id: &str) -> Result<Task> {
        let id = TaskId::parse(raw_id)?;
        Ok(self.store.find_by_id(id).await?)
    }

    // == Create ==
    /// Inserts a new open task. The list cache is left untouched.
    pub async fn create(&self, task: NewTask) -> Result<Task> {
        let task = self.store.insert(task).await?;
        debug!(id = %task.id, "Task created");
        Ok(task)
    }

    // == Update ==
    /// Overwrites every field present in `update` (the HTTP API always sends all four).
    pub async fn update(&self, raw_id: &str, update: TaskUpdate) -> Result<TaskId> {
        let id = TaskId::parse(raw_id)?;
        self.store.update_fields(id, update).await?;
        debug!(%id, "Task updated");
        Ok(id)
    }

    // == Delete ==
    pub async fn delete(&self, raw_id: &str) -> Result<TaskId> {
        let id = TaskId::parse(raw_id)?;
        self.store.delete_by_id(id).await?;
        debug!(%id, "Task deleted");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, MAX_VALUE_SIZE};
    use crate::clock::{Clock, ManualClock};
    use crate::error::TaskError;
    use crate::store::testing::CountingStore;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use tokio::sync::RwLock;

    struct Fixture {
        service: TaskService,
        store: Arc<CountingStore>,
        clock: Arc<ManualClock>,
    }

    fn fixture_with(store: CountingStore) -> Fixture {
        let store = Arc::new(store);
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = ListCache::new(
            Arc::new(RwLock::new(CacheStore::new())),
            clock.clone(),
            Duration::hours(1),
        );
        Fixture {
            service: TaskService::new(store.clone(), cache),
            store,
            clock,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(CountingStore::new())
    }

    fn new_task(title: &str, due_in: Duration) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: format!("{title} description"),
            due_date: Utc::now() + due_in,
        }
    }

    #[tokio::test]
    async fn test_list_miss_then_hit() {
        let f = fixture();
        f.service.create(new_task("a", Duration::days(1))).await.unwrap();

        let first = f.service.list().await.unwrap();
        assert_eq!(f.store.find_all_calls(), 1);
        assert!(f.service.cache().get().await.is_some());

        let second = f.service.list().await.unwrap();
        assert_eq!(f.store.find_all_calls(), 1, "second read must come from cache");
        assert_eq!(first, second);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_misses_all_populate() {
        const READERS: usize = 16;
        let f = fixture();
        for i in 0..5 {
            f.service.create(new_task(&format!("t{i}"), Duration::days(1))).await.unwrap();
        }
        let expected = f.store.inner.find_all().await.unwrap();

        let mut readers = tokio::task::JoinSet::new();
        for _ in 0..READERS {
            let service = f.service.clone();
            readers.spawn(async move { service.list().await });
        }

        while let Some(result) = readers.join_next().await {
            assert_eq!(result.unwrap().unwrap(), expected);
        }

        // Misses are not coalesced; every racing reader may scan and repopulate
        let scans = f.store.find_all_calls();
        assert!((1..=READERS).contains(&scans), "unexpected scan count {scans}");

        // The surviving snapshot is whole and serves the next read alone
        let snapshot = f.service.cache().get().await.unwrap();
        assert_eq!(snapshot.into_tasks().unwrap(), expected);
        assert_eq!(f.service.list().await.unwrap(), expected);
        assert_eq!(f.store.find_all_calls(), scans);
        assert_eq!(f.service.cache().stats().await.writes, scans as u64);
    }

    #[tokio::test]
    async fn test_list_after_expiry_hits_store_again() {
        let f = fixture();
        f.service.create(new_task("a", Duration::days(1))).await.unwrap();

        f.service.list().await.unwrap();
        f.clock.advance(Duration::hours(1));
        f.service.list().await.unwrap();

        assert_eq!(f.store.find_all_calls(), 2);
    }

    #[tokio::test]
    async fn test_writes_leave_cache_stale() {
        let f = fixture();
        let task = f.service.create(new_task("a", Duration::days(1))).await.unwrap();
        let cached = f.service.list().await.unwrap();

        f.service
            .update(
                &task.id.to_string(),
                TaskUpdate::replace_all("changed".into(), "d".into(), task.due_date, true),
            )
            .await
            .unwrap();
        f.service.create(new_task("b", Duration::days(2))).await.unwrap();

        // Still the pre-write snapshot
        assert_eq!(f.service.list().await.unwrap(), cached);

        f.service.delete(&task.id.to_string()).await.unwrap();
        assert_eq!(f.service.list().await.unwrap(), cached);
        assert_eq!(f.store.find_all_calls(), 1);

        f.clock.advance(Duration::hours(1));
        let fresh = f.service.list().await.unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].title, "b");
    }

    #[tokio::test]
    async fn test_list_store_failure() {
        let f = fixture_with(CountingStore::failing_after(0));

        let result = f.service.list().await;
        assert!(matches!(result, Err(TaskError::Store(_))));
        assert!(f.service.cache().get().await.is_none());
    }

    #[tokio::test]
    async fn test_list_populate_failure_still_returns_tasks() {
        let f = fixture();
        let oversized = NewTask {
            title: "big".to_string(),
            description: "x".repeat(MAX_VALUE_SIZE),
            due_date: Utc::now(),
        };
        f.service.create(oversized).await.unwrap();

        let tasks = f.service.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert!(f.service.cache().get().await.is_none());
    }

    #[tokio::test]
    async fn test_list_falls_back_on_corrupt_snapshot() {
        let f = fixture();
        f.service.create(new_task("a", Duration::days(1))).await.unwrap();

        let backend = f.service.cache().backend();
        backend
            .write()
            .await
            .set_hash(
                crate::cache::TASK_LIST_KEY.to_string(),
                [("Task 0".to_string(), "garbage".to_string())].into(),
                Some(Duration::hours(1)),
                f.clock.now(),
            )
            .unwrap();

        let tasks = f.service.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(f.store.find_all_calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_id_never_reaches_store() {
        let f = fixture();
        let update = TaskUpdate::replace_all("a".into(), "b".into(), Utc::now(), false);

        assert!(matches!(f.service.retrieve("nope").await, Err(TaskError::InvalidId(_))));
        assert!(matches!(f.service.update("", update).await, Err(TaskError::InvalidId(_))));
        assert!(matches!(f.service.delete("123").await, Err(TaskError::InvalidId(_))));
        assert_eq!(f.store.calls(), 0);
    }

    #[tokio::test]
    async fn test_retrieve_not_found_and_decode_failure() {
        let f = fixture();

        let missing = TaskId::new();
        let result = f.service.retrieve(&missing.to_string()).await;
        assert!(matches!(result, Err(TaskError::NotFound(_))));

        let broken = TaskId::new();
        f.store
            .inner
            .insert_document(broken, json!({ "id": broken, "due_date": "yesterday" }))
            .await;
        let result = f.service.retrieve(&broken.to_string()).await;
        assert!(matches!(result, Err(TaskError::Store(_))));
    }

    #[tokio::test]
    async fn test_create_starts_open() {
        let f = fixture();
        let task = f.service.create(new_task("a", Duration::days(-1))).await.unwrap();
        assert!(!task.completed);

        let fetched = f.service.retrieve(&task.id.to_string()).await.unwrap();
        assert_eq!(fetched, task);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_task() {
        let f = fixture();
        let id = TaskId::new().to_string();
        let update = TaskUpdate::replace_all("a".into(), "b".into(), Utc::now(), false);

        assert!(matches!(f.service.update(&id, update).await, Err(TaskError::NotFound(_))));
        assert!(matches!(f.service.delete(&id).await, Err(TaskError::NotFound(_))));
    }
}
