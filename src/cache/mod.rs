//! Cache Module
//!
//! In-memory hash cache with TTL expiration, and the task list snapshot built on it.

mod entry;
mod list;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use list::{ordinal_key, CacheSnapshot, ListCache, DEFAULT_LIST_TTL_SECS, TASK_LIST_KEY};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed size of a single hash field value in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
