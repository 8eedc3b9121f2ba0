//! `/health` endpoint.

use serde::Serialize;
use std::time::Instant;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is running.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Number of technique records currently loaded.
    pub catalog_size: usize,
    /// Catalog content version, when the document declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<String>,
}

/// Build a health response from live state.
pub fn health_check(
    start_time: Instant,
    catalog_size: usize,
    catalog_version: Option<String>,
) -> HealthResponse {
    HealthResponse {
        status: "ok".into(),
        uptime_secs: start_time.elapsed().as_secs(),
        catalog_size,
        catalog_version,
    }
}
