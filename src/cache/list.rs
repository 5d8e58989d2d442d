//! List Cache Module
//!
//! Read-through snapshot of the full task list, held under one aggregate
//! key with a fixed TTL. Writes to the task store never touch it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::clock::Clock;
use crate::error::CacheError;
use crate::models::Task;

/// Aggregate key holding the task list snapshot
pub const TASK_LIST_KEY: &str = "TaskList";

/// Default snapshot lifetime in seconds
pub const DEFAULT_LIST_TTL_SECS: u64 = 3600;

const ORDINAL_PREFIX: &str = "Task ";

/// Field name for the task at `index` ("Task 0", "Task 1", ...).
pub fn ordinal_key(index: usize) -> String {
    format!("{}{}", ORDINAL_PREFIX, index)
}

/// Inverse of [`ordinal_key`]. Only the exact canonical form is accepted,
/// so "Task 01" and "Task +1" are rejected.
fn parse_ordinal(key: &str) -> Option<usize> {
    let index = key.strip_prefix(ORDINAL_PREFIX)?.parse().ok()?;
    (ordinal_key(index) == key).then_some(index)
}

// == Cache Snapshot ==
/// Ordinal key to serialized task, exactly as held in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshot {
    entries: HashMap<String, String>,
}

impl CacheSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw serialized entry for one ordinal key.
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Decodes every entry, ordered by ordinal index.
    ///
    /// Fails on the first entry that is not a `Task <n>` key or not a valid task.
    pub fn into_tasks(self) -> Result<Vec<Task>, CacheError> {
        let mut indexed = self
            .entries
            .into_iter()
            .map(|(key, value)| -> Result<(usize, Task), CacheError> {
                let index = parse_ordinal(&key).ok_or(CacheError::UnexpectedKey(key))?;
                let task: Task = serde_json::from_str(&value)?;
                Ok((index, task))
            })
            .collect::<Result<Vec<_>, _>>()?;

        indexed.sort_unstable_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, task)| task).collect())
    }
}

// == List Cache ==
/// Handle to the task list snapshot. Cheap to clone.
#[derive(Clone)]
pub struct ListCache {
    backend: Arc<RwLock<CacheStore>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl ListCache {
    /// Creates a list cache over `backend` with the given snapshot TTL.
    pub fn new(backend: Arc<RwLock<CacheStore>>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            backend,
            clock,
            ttl,
        }
    }

    // == Get ==
    /// Returns the current snapshot, or None when it is absent or expired.
    pub async fn get(&self) -> Option<CacheSnapshot> {
        let now = self.clock.now();
        // Write lock: reads update stats and drop expired entries
        let mut backend = self.backend.write().await;
        backend
            .get_hash(TASK_LIST_KEY, now)
            .map(|entries| CacheSnapshot { entries })
    }

    // == Populate ==
    /// Replaces the snapshot with `tasks` and restarts the TTL.
    ///
    /// An empty list leaves no snapshot behind, the same as an empty hash
    /// in a Redis-style store.
    pub async fn populate(&self, tasks: &[Task]) -> Result<(), CacheError> {
        let entries = tasks
            .iter()
            .enumerate()
            .map(|(index, task)| -> Result<(String, String), CacheError> {
                Ok((ordinal_key(index), serde_json::to_string(task)?))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        let now = self.clock.now();
        let mut backend = self.backend.write().await;

        if entries.is_empty() {
            backend.delete(TASK_LIST_KEY);
            debug!("Task list empty, no snapshot cached");
            return Ok(());
        }

        let count = entries.len();
        backend.set_hash(TASK_LIST_KEY.to_string(), entries, Some(self.ttl), now)?;
        debug!(tasks = count, ttl_secs = self.ttl.num_seconds(), "Task list snapshot cached");
        Ok(())
    }

    /// Statistics of the underlying cache backend.
    pub async fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        self.backend.read().await.stats(now)
    }

    /// Remaining lifetime of the current snapshot.
    pub async fn ttl_remaining(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.backend.read().await.ttl(TASK_LIST_KEY, now)
    }

    pub fn backend(&self) -> Arc<RwLock<CacheStore>> {
        self.backend.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }
}
