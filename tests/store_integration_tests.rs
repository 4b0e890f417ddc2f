//! Integration Tests for the background sweep
//!
//! Runs real sweep tasks on a short interval while a manual clock decides
//! record ages.

use std::sync::Arc;
use std::time::Duration;

use ttl_store::store::{Clock, ManualClock};
use ttl_store::{Lifecycle, StoreConfig, TtlStore};

const SWEEP_INTERVAL: Duration = Duration::from_millis(50);
const START: i64 = 1_700_000_000;

// == Helper Functions ==

fn create_store(
    ttl_secs: u64,
    capacity_limit: usize,
) -> (TtlStore<String, i64>, Arc<ManualClock>, Lifecycle) {
    let lifecycle = Lifecycle::new();
    let clock = Arc::new(ManualClock::new(START));
    let config = StoreConfig::default()
        .with_ttl(Duration::from_secs(ttl_secs))
        .with_capacity_limit(capacity_limit)
        .with_sweep_interval(SWEEP_INTERVAL);
    let store = TtlStore::with_clock(&lifecycle, config, clock.clone() as Arc<dyn Clock>);
    (store, clock, lifecycle)
}

/// Sleeps long enough for a few sweeps to run.
async fn wait_for_sweeps() {
    tokio::time::sleep(SWEEP_INTERVAL * 4).await;
}

fn sorted_keys(store: &TtlStore<String, i64>) -> Vec<String> {
    let mut keys = store.keys();
    keys.sort();
    keys
}

// == Expiry ==

#[tokio::test]
async fn test_untouched_record_expires_after_sweep() {
    let (store, clock, _lifecycle) = create_store(1, 50);

    store.set("x".to_string(), 10);
    clock.advance(6);
    wait_for_sweeps().await;

    assert_eq!(store.get("x"), None);
    assert!(store.keys().is_empty());
    assert!(store.stats().expired >= 1);
}

#[tokio::test]
async fn test_read_before_ttl_keeps_record_alive() {
    let (store, clock, _lifecycle) = create_store(10, 50);

    store.set("kept".to_string(), 1);
    store.set("dropped".to_string(), 2);

    clock.advance(9);
    assert_eq!(store.get("kept"), Some(1));
    clock.advance(2);
    wait_for_sweeps().await;

    assert_eq!(sorted_keys(&store), vec!["kept"]);
}

#[tokio::test]
async fn test_live_records_survive_sweeps() {
    let (store, clock, _lifecycle) = create_store(100, 50);

    store.set("a".to_string(), 1);
    clock.advance(50);
    wait_for_sweeps().await;

    assert_eq!(store.get("a"), Some(1));
    assert!(store.stats().sweeps >= 1);
}

// == Capacity ==

#[tokio::test]
async fn test_capacity_eviction_removes_oldest() {
    let (store, clock, _lifecycle) = create_store(100, 2);

    store.set("a".to_string(), 1);
    clock.advance(1);
    store.set("b".to_string(), 2);
    clock.advance(1);
    store.set("c".to_string(), 3);
    clock.advance(3);
    wait_for_sweeps().await;

    assert_eq!(sorted_keys(&store), vec!["b", "c"]);
    assert_eq!(store.get("b"), Some(2));
    assert_eq!(store.get("c"), Some(3));
}

#[tokio::test]
async fn test_overflow_drains_to_capacity() {
    let (store, clock, _lifecycle) = create_store(1_000, 3);

    for i in 0..8 {
        store.set(format!("k{}", i), i);
        clock.advance(1);
    }
    tokio::time::sleep(SWEEP_INTERVAL * 12).await;

    assert_eq!(sorted_keys(&store), vec!["k5", "k6", "k7"]);
}

// == Lifecycle ==

#[tokio::test]
async fn test_cancel_stops_sweeping() {
    let (store, clock, lifecycle) = create_store(1, 50);

    store.set("x".to_string(), 1);
    lifecycle.cancel();
    // Let the task observe cancellation before the record becomes stale
    tokio::time::sleep(SWEEP_INTERVAL / 2).await;

    clock.advance(10);
    wait_for_sweeps().await;

    assert_eq!(store.get("x"), Some(1));
    assert_eq!(store.stats().sweeps, 0);
}

#[tokio::test]
async fn test_store_created_with_cancelled_lifecycle_never_sweeps() {
    let lifecycle = Lifecycle::new();
    lifecycle.cancel();

    let clock = Arc::new(ManualClock::new(START));
    let config = StoreConfig::default()
        .with_ttl(Duration::from_secs(1))
        .with_sweep_interval(SWEEP_INTERVAL);
    let store: TtlStore<String, i64> =
        TtlStore::with_clock(&lifecycle, config, clock.clone() as Arc<dyn Clock>);

    store.set("x".to_string(), 1);
    clock.advance(10);
    wait_for_sweeps().await;

    assert_eq!(store.get("x"), Some(1));
}

#[tokio::test]
async fn test_temporary_lifecycle_still_expires_records() {
    let clock = Arc::new(ManualClock::new(START));
    let config = StoreConfig::default()
        .with_ttl(Duration::from_secs(1))
        .with_sweep_interval(SWEEP_INTERVAL);
    let store: TtlStore<String, i64> =
        TtlStore::with_clock(&Lifecycle::new(), config, clock.clone() as Arc<dyn Clock>);

    store.set("x".to_string(), 10);
    clock.advance(6);
    wait_for_sweeps().await;

    assert_eq!(store.get("x"), None);
    assert!(store.stats().sweeps >= 1);
}

#[tokio::test]
async fn test_operations_keep_working_after_cancel() {
    let (store, _clock, lifecycle) = create_store(100, 50);
    lifecycle.cancel();

    store.set("a".to_string(), 1);
    store.update("a".to_string(), |current| current.copied().unwrap_or(0) + 1);
    assert_eq!(store.get("a"), Some(2));
    assert!(store.delete("a"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_while_sweeping() {
    let (store, _clock, _lifecycle) = create_store(100, 50);
    store.set("counter".to_string(), 0);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            for _ in 0..200 {
                store.update("counter".to_string(), |current| current.copied().unwrap_or(0) + 1);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.get("counter"), Some(16 * 200));
}
