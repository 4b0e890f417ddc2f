//! Request and Response models for the run cache API
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_run_id, RunPatch, MAX_RUN_ID_LENGTH};
pub use responses::{
    DeleteResponse, ErrorResponse, HealthResponse, RunResponse, RunsResponse, StatsResponse,
    StoreRunResponse,
};
