//! Background Tasks Module
//!
//! Long-running tasks started alongside the HTTP server.
//!
//! # Tasks
//! - Overdue sweeper: completes tasks whose due date has passed
//! - Cache cleanup: purges expired cache entries at a configured interval

mod cleanup;
mod sweeper;

pub use cleanup::spawn_cleanup_task;
pub use sweeper::{spawn_overdue_sweeper, OverdueSweeper};
