// Liveness endpoint

use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Instant;
use utoipa::ToSchema;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the process start time; called once from main
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub timestamp: String,
    /// Seconds since process start
    pub uptime: u64,
    #[schema(example = "development")]
    pub environment: String,
}

/// Health check
/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "health"
)]
pub async fn health_handler() -> Json<HealthResponse> {
    let uptime = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        uptime,
        environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_ok() {
        init_start_time();
        let Json(body) = health_handler().await;

        assert_eq!(body.status, "ok");
        assert!(!body.timestamp.is_empty());
    }
}
