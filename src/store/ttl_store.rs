//! TTL Store Module
//!
//! Concurrent key-value map whose records expire after a period without use,
//! with a soft capacity bound enforced by the background sweep.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::warn;

use crate::store::record::Record;
use crate::store::{Clock, StoreConfig, StoreStats, SweepReport, SystemClock};
use crate::tasks::{spawn_sweep_task, Lifecycle, Sweep};

// == TTL Store ==
/// Bounded key-value store with touch-on-access TTL expiry.
///
/// Every `set`, `get` and `update` refreshes the record's timestamp. A
/// background sweep (every 5 seconds by default) removes records untouched for
/// longer than the TTL and then, if the store still holds more than its
/// capacity limit, evicts the single oldest survivor. Only one record is
/// evicted per sweep, so the store may sit above its limit between sweeps.
///
/// Handles are cheap to clone and all share the same records. The sweep stops
/// when the [`Lifecycle`] passed at construction is cancelled, or once every
/// handle to the store has been dropped.
///
/// # Example
/// ```rust,no_run
/// use std::time::Duration;
/// use ttl_store::store::TtlStore;
/// use ttl_store::tasks::Lifecycle;
///
/// #[tokio::main]
/// async fn main() {
///     let lifecycle = Lifecycle::new();
///     let store = TtlStore::new(&lifecycle, 10, Duration::from_secs(60));
///
///     store.set("run-1", 0u32);
///     store.update("run-1", |count| count.copied().unwrap_or_default() + 1);
///     assert_eq!(store.get("run-1"), Some(1));
///
///     lifecycle.cancel();
/// }
/// ```
#[derive(Debug)]
pub struct TtlStore<K, V> {
    shared: Arc<Shared<K, V>>,
}

impl<K, V> Clone for TtlStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

#[derive(Debug)]
struct Shared<K, V> {
    state: Mutex<State<K, V>>,
    clock: Arc<dyn Clock>,
    ttl_secs: i64,
    capacity_limit: usize,
}

#[derive(Debug)]
struct State<K, V> {
    records: HashMap<K, Record<V>>,
    stats: StoreStats,
}

impl<K: Eq + Hash, V> State<K, V> {
    /// Inserts or overwrites `key` and touches it at `now`.
    fn put(&mut self, key: K, value: V, now: i64) {
        match self.records.entry(key) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                record.value = value;
                record.touch(now);
            }
            Entry::Vacant(entry) => {
                entry.insert(Record::new(value, now));
            }
        }
    }
}

impl<K, V> Shared<K, V> {
    // == Lock ==
    /// Acquires the store lock.
    ///
    /// A poisoned lock is recovered: `update` hands its transformation a shared
    /// reference and writes only after it returns, so a panic never leaves a
    /// partially applied mutation behind.
    fn lock(&self) -> MutexGuard<'_, State<K, V>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Recovering store lock poisoned by a panicking update");
            self.state.clear_poison();
            PoisonError::into_inner(poisoned)
        })
    }
}

impl<K, V> TtlStore<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    // == Constructors ==
    /// Creates a store and starts its background sweep.
    ///
    /// Uses the default capacity limit (50 records) and sweep interval (5 seconds).
    ///
    /// # Arguments
    /// * `lifecycle` - Cancelling it stops the sweep; dropping it does not
    /// * `initial_capacity` - Non-binding size hint for the underlying map
    /// * `ttl` - Maximum age in whole seconds a record may reach
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn new(lifecycle: &Lifecycle, initial_capacity: usize, ttl: Duration) -> Self {
        let config = StoreConfig::default()
            .with_initial_capacity(initial_capacity)
            .with_ttl(ttl);
        Self::with_config(lifecycle, config)
    }

    /// Creates a store from a full configuration, dated by the system clock.
    pub fn with_config(lifecycle: &Lifecycle, config: StoreConfig) -> Self {
        Self::with_clock(lifecycle, config, Arc::new(SystemClock))
    }

    /// Creates a store whose record timestamps come from `clock`.
    pub fn with_clock(lifecycle: &Lifecycle, config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                records: HashMap::with_capacity(config.initial_capacity),
                stats: StoreStats::new(),
            }),
            clock,
            ttl_secs: config.ttl_secs(),
            capacity_limit: config.capacity_limit,
        });

        spawn_sweep_task(Arc::downgrade(&shared), config.sweep_interval, lifecycle);

        Self { shared }
    }

    // == Set ==
    /// Inserts or overwrites the value for `key` and touches it.
    pub fn set(&self, key: K, value: V) {
        let now = self.shared.clock.now();
        self.shared.lock().put(key, value, now);
    }

    // == Get ==
    /// Returns a copy of the value for `key`, touching the record.
    ///
    /// Reads extend a record's lifetime just like writes do.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.shared.clock.now();
        let mut state = self.shared.lock();

        let value = state.records.get_mut(key).map(|record| {
            record.touch(now);
            record.value.clone()
        });

        if value.is_some() {
            state.stats.record_hit();
        } else {
            state.stats.record_miss();
        }
        value
    }

    // == Update ==
    /// Atomically replaces the value for `key` with `f(current)`.
    ///
    /// `f` receives the current value, or `None` when the key is absent, and
    /// its result is stored and touched as if by `set`. It runs while the
    /// store lock is held: it must not call back into the store and should
    /// return quickly. If `f` panics nothing is written.
    pub fn update<F>(&self, key: K, f: F)
    where
        F: FnOnce(Option<&V>) -> V,
    {
        let mut state = self.shared.lock();

        let value = f(state.records.get(&key).map(|record| &record.value));
        let now = self.shared.clock.now();
        state.put(key, value, now);
    }

    // == Delete ==
    /// Removes the record for `key`.
    ///
    /// Returns whether a record was removed; deleting a missing key is not an error.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.shared.lock().records.remove(key).is_some()
    }

    // == Keys ==
    /// Returns a point-in-time snapshot of all keys, in no particular order.
    pub fn keys(&self) -> Vec<K> {
        self.shared.lock().records.keys().cloned().collect()
    }

    // == Length ==
    /// Returns the current number of records.
    pub fn len(&self) -> usize {
        self.shared.lock().records.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.shared.lock().records.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the store counters.
    pub fn stats(&self) -> StoreStats {
        let state = self.shared.lock();
        let mut stats = state.stats.clone();
        stats.total_entries = state.records.len();
        stats
    }

    /// Configured time to live, in whole seconds.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.shared.ttl_secs.max(0) as u64)
    }

    /// Configured soft record limit.
    pub fn capacity_limit(&self) -> usize {
        self.shared.capacity_limit
    }

    #[cfg(test)]
    pub(crate) fn sweep_now(&self) -> SweepReport {
        self.shared.sweep()
    }

    #[cfg(test)]
    fn last_touched(&self, key: &K) -> Option<i64> {
        self.shared
            .lock()
            .records
            .get(key)
            .map(|record| record.last_touched())
    }
}

// == Sweep ==
impl<K, V> Sweep for Shared<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Send + 'static,
{
    /// Removes every record older than the TTL, then evicts the oldest
    /// survivor if the store is still over its capacity limit.
    ///
    /// Done in one pass over the map. When several survivors share the
    /// greatest age, whichever the map yields first is evicted.
    fn sweep(&self) -> SweepReport {
        let mut state = self.lock();
        let now = self.clock.now();
        let ttl_secs = self.ttl_secs;

        let before = state.records.len();
        let mut oldest: Option<(K, i64)> = None;

        state.records.retain(|key, record| {
            let age = record.age(now);
            if age > ttl_secs {
                return false;
            }
            if oldest.as_ref().map_or(true, |(_, oldest_age)| age > *oldest_age) {
                oldest = Some((key.clone(), age));
            }
            true
        });

        let expired = before - state.records.len();
        let mut evicted = false;

        if state.records.len() > self.capacity_limit {
            if let Some((key, _)) = oldest {
                evicted = state.records.remove(&key).is_some();
            }
        }

        let report = SweepReport {
            expired,
            evicted,
            remaining: state.records.len(),
        };
        state.stats.record_sweep(&report);
        report
    }
}
