//! Configuration Module
//!
//! Handles loading the run cache server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::store::StoreConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Soft maximum number of records kept in the store
    pub capacity_limit: usize,
    /// Time to live in seconds for records nobody touches
    pub ttl_secs: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Initial size hint for the store's map
    pub size_hint: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STORE_CAPACITY` - Soft record limit (default: 50)
    /// - `STORE_TTL` - TTL in seconds (default: 21600, six hours)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 5)
    /// - `STORE_SIZE_HINT` - Initial map size (default: 10)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    ///
    /// Missing or unparsable values fall back to their defaults. A zero sweep
    /// interval is treated as unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity_limit: env_or("STORE_CAPACITY", defaults.capacity_limit),
            ttl_secs: env_or("STORE_TTL", defaults.ttl_secs),
            sweep_interval: Some(env_or("SWEEP_INTERVAL", defaults.sweep_interval))
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            size_hint: env_or("STORE_SIZE_HINT", defaults.size_hint),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Builds the store configuration described by these settings.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new()
            .with_capacity_limit(self.capacity_limit)
            .with_ttl(Duration::from_secs(self.ttl_secs))
            .with_sweep_interval(Duration::from_secs(self.sweep_interval))
            .with_initial_capacity(self.size_hint)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_limit: 50,
            ttl_secs: 6 * 60 * 60,
            sweep_interval: 5,
            size_hint: 10,
            server_port: 8080,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
