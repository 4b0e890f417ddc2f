//! Response DTOs for the run cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::store::StoreStats;

/// Response body for `GET /runs/:id` and `PATCH /runs/:id`
#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    /// The run id
    pub id: String,
    /// The stored run record
    pub value: Value,
}

impl RunResponse {
    /// Creates a new RunResponse
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// Response body for `PUT /runs/:id`
#[derive(Debug, Clone, Serialize)]
pub struct StoreRunResponse {
    /// Success message
    pub message: String,
    /// The id that was stored
    pub id: String,
}

impl StoreRunResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Run '{}' stored successfully", id),
            id,
        }
    }
}

/// Response body for `DELETE /runs/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: String,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Run '{}' deleted successfully", id),
            id,
        }
    }
}

/// Response body for `GET /runs`
#[derive(Debug, Clone, Serialize)]
pub struct RunsResponse {
    /// Ids of all stored runs, sorted
    pub runs: Vec<String>,
    /// Number of ids
    pub count: usize,
}

impl RunsResponse {
    /// Creates a RunsResponse from an unordered key snapshot
    pub fn new(mut runs: Vec<String>) -> Self {
        runs.sort();
        Self {
            count: runs.len(),
            runs,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Store counters
    #[serde(flatten)]
    pub stats: StoreStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Soft record limit
    pub capacity_limit: usize,
    /// Time to live in seconds
    pub ttl_secs: u64,
}

impl StatsResponse {
    pub fn new(stats: StoreStats, capacity_limit: usize, ttl_secs: u64) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            capacity_limit,
            ttl_secs,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_run_response_serialize() {
        let resp = RunResponse::new("run-1", json!({"status": "ok"}));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"id": "run-1", "value": {"status": "ok"}}));
    }

    #[test]
    fn test_store_and_delete_messages() {
        assert!(StoreRunResponse::new("a").message.contains("stored"));
        assert!(DeleteResponse::new("a").message.contains("deleted"));
    }

    #[test]
    fn test_runs_response_sorted() {
        let resp = RunsResponse::new(vec!["b".to_string(), "c".to_string(), "a".to_string()]);
        assert_eq!(resp.runs, vec!["a", "b", "c"]);
        assert_eq!(resp.count, 3);
    }

    #[test]
    fn test_stats_response_flattens_counters() {
        let stats = StoreStats {
            hits: 3,
            misses: 1,
            ..StoreStats::default()
        };
        let json = serde_json::to_value(StatsResponse::new(stats, 50, 60)).unwrap();

        assert_eq!(json["hits"], 3);
        assert_eq!(json["misses"], 1);
        assert_eq!(json["hit_rate"], 0.75);
        assert_eq!(json["capacity_limit"], 50);
        assert_eq!(json["ttl_secs"], 60);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
