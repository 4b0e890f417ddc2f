//! API Routes
//!
//! Configures the Axum router with all run cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_run_handler, get_run_handler, health_handler, list_runs_handler, patch_run_handler,
    put_run_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /runs` - List stored run ids
/// - `PUT /runs/:id` - Store a run record
/// - `GET /runs/:id` - Retrieve a run record
/// - `PATCH /runs/:id` - Merge fields into a run record
/// - `DELETE /runs/:id` - Delete a run record
/// - `GET /stats` - Store statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/runs", get(list_runs_handler))
        .route(
            "/runs/:id",
            get(get_run_handler)
                .put(put_run_handler)
                .patch(patch_run_handler)
                .delete(delete_run_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
