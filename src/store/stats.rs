//! Store Statistics Module
//!
//! Tracks lookups and sweep outcomes.

use serde::Serialize;

// == Store Stats ==
/// Counters describing what the store has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Lookups that found a record
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Records removed because they outlived the TTL
    pub expired: u64,
    /// Records removed to bring the store back under its capacity limit
    pub evicted: u64,
    /// Completed sweep passes
    pub sweeps: u64,
    /// Current number of records
    pub total_entries: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing has been looked up.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Sweep ==
    /// Folds one sweep's outcome into the counters.
    pub(crate) fn record_sweep(&mut self, report: &SweepReport) {
        self.sweeps += 1;
        self.expired += report.expired as u64;
        if report.evicted {
            self.evicted += 1;
        }
    }
}

// == Sweep Report ==
/// Outcome of a single sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Number of records removed by TTL expiry
    pub expired: usize,
    /// Whether the oldest survivor was evicted for capacity
    pub evicted: bool,
    /// Records left after the sweep
    pub remaining: usize,
}

impl SweepReport {
    /// Total number of records removed by this pass.
    pub fn removed(&self) -> usize {
        self.expired + usize::from(self.evicted)
    }
}
