//! TTL Store - A bounded in-memory key-value store with background expiry
//!
//! Records expire after a period without use and a periodic sweep keeps the
//! store near its capacity limit. A small HTTP API exposes a store of run
//! records.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use store::{StoreConfig, TtlStore};
pub use tasks::Lifecycle;
