//! Response DTOs for the task service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::TaskId;

/// Acknowledgement body for update and delete
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    /// Success message
    pub message: String,
    /// The task that was affected
    pub id: String,
}

impl AckResponse {
    /// Acknowledges an update
    pub fn updated(id: TaskId) -> Self {
        Self {
            message: format!("Task '{}' updated successfully", id),
            id: id.to_string(),
        }
    }

    /// Acknowledges a delete
    pub fn deleted(id: TaskId) -> Self {
        Self {
            message: format!("Task '{}' deleted successfully", id),
            id: id.to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of list cache hits
    pub hits: u64,
    /// Number of list cache misses
    pub misses: u64,
    /// Number of snapshot populations
    pub writes: u64,
    /// Live aggregate keys in the cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            writes: stats.writes,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ack_response_serialize() {
        let id = TaskId::new();
        let json = serde_json::to_string(&AckResponse::deleted(id)).unwrap();
        assert!(json.contains(&id.to_string()));
        assert!(json.contains("deleted"));

        let json = serde_json::to_string(&AckResponse::updated(id)).unwrap();
        assert!(json.contains("updated"));
    }

    #[test]
    fn test_stats_response_from_stats() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            writes: 1,
            total_entries: 1,
        };

        let resp = StatsResponse::from(stats);
        assert_eq!(resp.hits, 3);
        assert_eq!(resp.misses, 1);
        assert_eq!(resp.writes, 1);
        assert_eq!(resp.total_entries, 1);
        assert!((resp.hit_rate - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
