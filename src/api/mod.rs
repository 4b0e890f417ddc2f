//! API Module
//!
//! HTTP handlers and routing for the run cache REST API.
//!
//! # Endpoints
//! - `GET /runs` - List stored run ids
//! - `PUT|GET|PATCH|DELETE /runs/:id` - Manage one run record
//! - `GET /stats` - Store statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
