//! Cache Cleanup Task
//!
//! Background task that periodically purges expired cache entries, so an
//! expired task list snapshot does not linger until the next list read.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ListCache;

/// Spawns a background task that periodically removes expired cache entries.
///
/// The task runs in an infinite loop, sleeping for `interval` between
/// runs, and takes the cache write lock only while purging.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cleanup_handle = spawn_cleanup_task(list_cache.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: ListCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} ms",
            interval.as_millis()
        );

        let backend = cache.backend();
        let clock = cache.clock();

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = backend.write().await;
                guard.cleanup_expired(clock.now())
            };

            if removed > 0 {
                info!("Cache cleanup: removed {} expired entries", removed);
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
