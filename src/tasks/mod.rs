//! Background Tasks Module
//!
//! Contains the lifecycle handle and the tasks that run periodically while it is live.
//!
//! # Tasks
//! - Sweep: Expires old records and evicts the oldest survivor when over capacity

mod lifecycle;
mod sweep;

pub use lifecycle::Lifecycle;
pub(crate) use sweep::{spawn_sweep_task, Sweep};
