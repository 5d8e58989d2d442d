//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Task list snapshot lifetime in seconds
    pub cache_ttl: u64,
    /// Cache cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Pause between overdue sweeps in milliseconds; 0 rescans immediately
    pub sweep_interval_ms: u64,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 9000)
    /// - `CACHE_TTL` - Task list cache TTL in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Cache cleanup frequency in seconds (default: 60, minimum: 1)
    /// - `SWEEP_INTERVAL_MS` - Pause between overdue sweeps in ms (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            sweep_interval_ms: env_or("SWEEP_INTERVAL_MS", defaults.sweep_interval_ms),
        }
    }

    /// Snapshot TTL, capped at `u32::MAX` seconds so expiry timestamps cannot overflow.
    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_ttl.min(u64::from(u32::MAX)) as i64)
    }

    /// Cleanup period, never shorter than one second.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval.max(1))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 9000,
            cache_ttl: crate::cache::DEFAULT_LIST_TTL_SECS,
            cleanup_interval: 60,
            sweep_interval_ms: 0,
        }
    }
}
