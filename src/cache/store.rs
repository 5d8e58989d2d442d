//! Cache Store Module
//!
//! Key-value engine holding hash-valued entries with TTL expiration.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::cache::{CacheEntry, CacheStats, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::CacheError;

// == Cache Store ==
/// Hash-per-key cache storage with TTL support.
///
/// Callers pass the current time into every time-sensitive operation.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Aggregate key to hash storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Set Hash ==
    /// Stores `fields` under `key`, replacing any previous hash and TTL.
    ///
    /// Limits are checked before anything is written, so a rejected call
    /// leaves the previous hash in place.
    pub fn set_hash(
        &mut self,
        key: String,
        fields: HashMap<String, String>,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::KeyTooLong {
                max: MAX_KEY_LENGTH,
            });
        }

        if let Some((field, _)) = fields.iter().find(|(_, value)| value.len() > MAX_VALUE_SIZE) {
            return Err(CacheError::ValueTooLarge {
                field: field.clone(),
                max: MAX_VALUE_SIZE,
            });
        }

        self.entries.insert(key, CacheEntry::new(fields, ttl, now));
        self.stats.record_write();

        Ok(())
    }

    // == Get Hash ==
    /// Retrieves all fields stored under `key`.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get_hash(&mut self, key: &str, now: DateTime<Utc>) -> Option<HashMap<String, String>> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(key);
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let fields = entry.fields.clone();
                self.stats.record_hit();
                Some(fields)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == TTL ==
    /// Remaining time to live of a live key; None for missing, expired, or persistent keys.
    pub fn ttl(&self, key: &str, now: DateTime<Utc>) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.ttl_remaining(now))
    }

    // == Delete ==
    /// Removes a key. Returns whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Stats ==
    /// Returns current cache statistics.
    ///
    /// Entries already expired at `now` are not counted, even if no read or
    /// cleanup pass has removed them yet.
    pub fn stats(&self, now: DateTime<Utc>) -> CacheStats {
        let live = self
            .entries
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count();
        self.stats.with_live_entries(live)
    }

    // == Cleanup Expired ==
    /// Removes all entries expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
