//! Store Configuration Module
//!
//! Tunables for a `TtlStore`: TTL, capacity limit, sweep interval and map size hint.

use std::time::Duration;

use crate::store::{
    DEFAULT_CAPACITY_LIMIT, DEFAULT_INITIAL_CAPACITY, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL,
};

/// Configuration for a `TtlStore`.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use ttl_store::store::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_ttl(Duration::from_secs(60))
///     .with_capacity_limit(100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum age a record may reach before a sweep removes it (whole seconds)
    pub ttl: Duration,
    /// Soft maximum number of records
    pub capacity_limit: usize,
    /// Interval between background sweeps
    pub sweep_interval: Duration,
    /// Non-binding initial size of the underlying map
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            capacity_limit: DEFAULT_CAPACITY_LIMIT,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time to live. Sub-second parts are ignored.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the soft record limit.
    pub fn with_capacity_limit(mut self, limit: usize) -> Self {
        self.capacity_limit = limit;
        self
    }

    /// Sets the sweep interval. A zero interval falls back to the default.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = if interval.is_zero() {
            DEFAULT_SWEEP_INTERVAL
        } else {
            interval
        };
        self
    }

    /// Sets the initial map size hint.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// TTL in whole seconds, the granularity record ages are measured in.
    pub(crate) fn ttl_secs(&self) -> i64 {
        i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.capacity_limit, 50);
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
        assert_eq!(config.ttl, Duration::from_secs(21_600));
        assert_eq!(config.initial_capacity, 10);
    }

    #[test]
    fn test_builder_chaining() {
        let config = StoreConfig::new()
            .with_ttl(Duration::from_secs(30))
            .with_capacity_limit(2)
            .with_sweep_interval(Duration::from_millis(250))
            .with_initial_capacity(64);

        assert_eq!(config.ttl, Duration::from_secs(30));
        assert_eq!(config.capacity_limit, 2);
        assert_eq!(config.sweep_interval, Duration::from_millis(250));
        assert_eq!(config.initial_capacity, 64);
    }

    #[test]
    fn test_zero_sweep_interval_falls_back_to_default() {
        let config = StoreConfig::new().with_sweep_interval(Duration::ZERO);
        assert_eq!(config.sweep_interval, DEFAULT_SWEEP_INTERVAL);
    }

    #[test]
    fn test_ttl_secs_truncates_fractions() {
        let config = StoreConfig::default().with_ttl(Duration::from_millis(1_900));
        assert_eq!(config.ttl_secs(), 1);
    }
}
