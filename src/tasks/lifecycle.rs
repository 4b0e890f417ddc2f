//! Lifecycle Handle
//!
//! Cancellation signal shared between an owner and the background tasks it starts.

use std::sync::Arc;

use tokio::sync::watch;

// == Lifecycle ==
/// Clonable cancellation handle.
///
/// Background tasks keep their own clone and exit only once [`Lifecycle::cancel`]
/// has been called. Dropping the caller's clones does not cancel anything.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    tx: Arc<watch::Sender<bool>>,
}

impl Lifecycle {
    /// Creates a live (not cancelled) lifecycle.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signals cancellation to every subscriber. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true once `cancel` has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Returns a receiver observing the cancellation flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Resolves once the lifecycle is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so `wait_for` cannot fail here.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
