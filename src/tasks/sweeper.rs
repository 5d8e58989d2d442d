//! Overdue Sweeper
//!
//! Background loop that marks tasks completed once their due date has passed.
//!
//! With a zero interval the loop rescans the store back to back, only
//! yielding to the scheduler between iterations. The first failed scan ends
//! the loop for good; the process keeps serving requests.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};

use crate::clock::Clock;
use crate::models::TaskUpdate;
use crate::store::{StoreError, TaskStore};

// == Overdue Sweeper ==
pub struct OverdueSweeper {
    store: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
    /// Pause between iterations; zero means none
    interval: Duration,
}

impl OverdueSweeper {
    pub fn new(store: Arc<dyn TaskStore>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            store,
            clock,
            interval,
        }
    }

    // == Sweep Once ==
    /// Runs one scan, completing every open task due strictly before now.
    ///
    /// Returns the number of tasks completed. Only the scan itself can fail;
    /// a task that disappears mid-sweep is skipped, as is any other failed
    /// per-task update.
    pub async fn sweep_once(&self) -> Result<usize, StoreError> {
        let tasks = self.store.find_all().await?;
        let now = self.clock.now();

        let mut completed = 0;
        for task in tasks.iter().filter(|task| task.is_overdue(now)) {
            match self
                .store
                .update_fields(task.id, TaskUpdate::mark_completed())
                .await
            {
                Ok(()) => completed += 1,
                Err(StoreError::NotFound(id)) => {
                    debug!(%id, "Overdue task deleted before it could be completed")
                }
                Err(err) => warn!(id = %task.id, error = %err, "Failed to complete overdue task"),
            }
        }

        Ok(completed)
    }

    // == Run ==
    /// Sweeps until a scan fails, then returns that failure.
    pub async fn run(self) -> StoreError {
        info!(interval_ms = self.interval.as_millis() as u64, "Overdue sweeper started");

        let mut iteration: u64 = 0;
        loop {
            match self.sweep_once().await {
                Ok(0) => trace!(iteration, "Sweep found no overdue tasks"),
                Ok(completed) => info!(iteration, completed, "Completed overdue tasks"),
                Err(err) => {
                    error!(iteration, error = %err, "Overdue sweeper stopped: task scan failed");
                    return err;
                }
            }
            iteration += 1;

            if self.interval.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(self.interval).await;
            }
        }
    }
}

/// Spawns the sweeper on the runtime.
///
/// The handle resolves to the scan failure that stopped the sweeper; abort
/// it during shutdown.
pub fn spawn_overdue_sweeper(
    store: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
) -> JoinHandle<StoreError> {
    tokio::spawn(OverdueSweeper::new(store, clock, interval).run())
}
