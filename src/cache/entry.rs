//! Cache Entry Module
//!
//! Defines a hash-valued cache entry with TTL support.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// A single aggregate key: a field-to-value hash plus expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored fields
    pub fields: HashMap<String, String>,
    /// Expiration timestamp, None = no expiration
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// # Arguments
    /// * `fields` - The hash to store
    /// * `ttl` - Optional time to live
    /// * `now` - Current time, the TTL counts from here
    pub fn new(fields: HashMap<String, String>, ttl: Option<Duration>, now: DateTime<Utc>) -> Self {
        Self {
            fields,
            expires_at: ttl.map(|ttl| now + ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now >= expires_at`, so it is gone the
    /// instant the TTL has fully elapsed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::zero())` if the entry has expired
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.expires_at
            .map(|expires| (expires - now).max(Duration::zero()))
    }
}
