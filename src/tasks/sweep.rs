//! Sweep Task
//!
//! Background task that periodically runs a store's TTL and capacity sweep.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::store::{SweepReport, DEFAULT_SWEEP_INTERVAL};
use crate::tasks::Lifecycle;

// == Sweep Trait ==
/// Something that can run one maintenance pass.
pub(crate) trait Sweep: Send + Sync + 'static {
    /// Runs one sweep and reports what was removed.
    fn sweep(&self) -> SweepReport;
}

/// Spawns a background task that calls `target.sweep()` every `interval`.
///
/// The first sweep happens one full interval after spawning. The task keeps
/// its own clone of the lifecycle, so it exits only when the lifecycle is
/// cancelled or when the target itself has been dropped. Cancellation wins over
/// a tick that is due at the same moment, so no sweep runs once cancellation is
/// observed. A zero `interval` falls back to [`DEFAULT_SWEEP_INTERVAL`].
///
/// # Panics
/// Panics if called outside a Tokio runtime.
///
/// # Example
/// ```ignore
/// let lifecycle = Lifecycle::new();
/// let handle = spawn_sweep_task(Arc::downgrade(&shared), Duration::from_secs(5), &lifecycle);
/// // Later, during shutdown:
/// lifecycle.cancel();
/// ```
pub(crate) fn spawn_sweep_task<S: Sweep>(
    target: Weak<S>,
    interval: Duration,
    lifecycle: &Lifecycle,
) -> JoinHandle<()> {
    let interval = if interval.is_zero() {
        DEFAULT_SWEEP_INTERVAL
    } else {
        interval
    };
    let lifecycle = lifecycle.clone();
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        debug!("Starting sweep task with interval of {:?}", interval);

        while !lifecycle.is_cancelled() {
            tokio::select! {
                biased;

                _ = lifecycle.cancelled() => {
                    debug!("Lifecycle cancelled, stopping sweep task");
                }
                _ = ticker.tick() => {
                    let Some(live) = target.upgrade() else {
                        debug!("Store dropped, stopping sweep task");
                        break;
                    };
                    let report = live.sweep();
                    drop(live);

                    if report.removed() > 0 {
                        info!(
                            "Sweep: expired {} records, evicted {}, {} remaining",
                            report.expired,
                            usize::from(report.evicted),
                            report.remaining
                        );
                    } else {
                        debug!("Sweep: nothing to remove, {} records", report.remaining);
                    }
                }
            }
        }

        debug!("Sweep task stopped");
    })
}
