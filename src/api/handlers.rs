//! API Handlers
//!
//! HTTP request handlers for each run cache endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    validate_run_id, DeleteResponse, HealthResponse, RunPatch, RunResponse, RunsResponse,
    StatsResponse, StoreRunResponse,
};
use crate::store::TtlStore;
use crate::tasks::Lifecycle;

/// Store holding run records keyed by run id.
pub type RunStore = TtlStore<String, Value>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Run records; the store does its own locking
    pub store: RunStore,
}

impl AppState {
    /// Creates a new AppState around an existing store.
    pub fn new(store: RunStore) -> Self {
        Self { store }
    }

    /// Creates the store described by `config`, tied to `lifecycle`.
    pub fn from_config(config: &Config, lifecycle: &Lifecycle) -> Self {
        Self::new(TtlStore::with_config(lifecycle, config.store_config()))
    }
}

fn checked_id(id: String) -> Result<String> {
    match validate_run_id(&id) {
        Some(message) => Err(ApiError::InvalidRequest(message)),
        None => Ok(id),
    }
}

/// Handler for PUT /runs/:id
///
/// Stores the JSON body as the run record, replacing any previous one.
pub async fn put_run_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<StoreRunResponse>> {
    let id = checked_id(id)?;
    state.store.set(id.clone(), value);

    Ok(Json(StoreRunResponse::new(id)))
}

/// Handler for GET /runs/:id
///
/// Reading a run also extends its lifetime.
pub async fn get_run_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RunResponse>> {
    let id = checked_id(id)?;
    match state.store.get(&id) {
        Some(value) => Ok(Json(RunResponse::new(id, value))),
        None => Err(ApiError::NotFound(id)),
    }
}

/// Handler for PATCH /runs/:id
///
/// Merges a JSON object into the stored run in one atomic step, creating the
/// run if it does not exist yet.
pub async fn patch_run_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<RunResponse>> {
    let id = checked_id(id)?;
    let patch = RunPatch::from_value(body).map_err(ApiError::InvalidRequest)?;

    let mut merged = Value::Null;
    state.store.update(id.clone(), |current| {
        merged = patch.apply(current);
        merged.clone()
    });

    Ok(Json(RunResponse::new(id, merged)))
}

/// Handler for DELETE /runs/:id
pub async fn delete_run_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = checked_id(id)?;
    if state.store.delete(&id) {
        Ok(Json(DeleteResponse::new(id)))
    } else {
        Err(ApiError::NotFound(id))
    }
}

/// Handler for GET /runs
///
/// Lists the ids stored at the time of the call.
pub async fn list_runs_handler(State(state): State<AppState>) -> Json<RunsResponse> {
    Json(RunsResponse::new(state.store.keys()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(
        state.store.stats(),
        state.store.capacity_limit(),
        state.store.ttl().as_secs(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
