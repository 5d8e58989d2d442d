//! Task Manager - A task management HTTP service
//!
//! Serves CRUD over task records with a read-through, time-bounded cache of
//! the full task list and a background sweeper that completes overdue tasks.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use service::TaskService;
pub use tasks::{spawn_cleanup_task, spawn_overdue_sweeper};
