//! Cache Statistics Module
//!
//! Counters reported by `GET /stats` for the list cache.

use serde::Serialize;

// == Cache Stats ==
/// Read and write counters plus the number of live keys.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Reads that found a live hash
    pub hits: u64,
    /// Reads that found nothing, or an expired hash
    pub misses: u64,
    /// Hashes accepted by `set_hash`
    pub writes: u64,
    /// Keys not yet expired at the time the stats were taken
    pub total_entries: usize,
}

impl CacheStats {
    /// Fraction of reads served from cache; 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            reads => self.hits as f64 / reads as f64,
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_write(&mut self) {
        self.writes += 1;
    }

    /// Copy of the counters paired with a freshly counted number of live keys.
    pub(crate) fn with_live_entries(&self, live: usize) -> Self {
        Self {
            total_entries: live,
            ..self.clone()
        }
    }
}
