//! Store Module
//!
//! Bounded key-value store with TTL expiration and a periodic background sweep.
//!
//! All operations share one whole-store lock. That keeps the store simple for
//! low-traffic callers but serializes unrelated keys; sharding by key hash into
//! independently swept partitions is the way out if throughput ever matters.

mod clock;
mod config;
mod record;
mod stats;
mod ttl_store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StoreConfig;
pub use stats::{StoreStats, SweepReport};
pub use ttl_store::TtlStore;

use std::time::Duration;

// == Public Constants ==
/// Soft maximum number of records, enforced one eviction per sweep
pub const DEFAULT_CAPACITY_LIMIT: usize = 50;

/// Period between two background sweeps
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Time to live used when none is configured (6 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Initial size hint for the underlying map
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;
