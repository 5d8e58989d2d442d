//! API Module
//!
//! HTTP handlers and routing for the task service REST API.
//!
//! # Endpoints
//! - `GET /list` - List all tasks (cache-first)
//! - `GET /retrieve?taskID=` - Retrieve a task by ID
//! - `POST /create` - Create a task
//! - `PUT /update?taskID=` - Replace a task's fields
//! - `DELETE /delete?taskID=` - Delete a task
//! - `GET /stats` - List cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
