use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AgentSettings;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub config: String,
    pub agent: String,
}

pub struct HealthHandler {
    settings: Arc<AgentSettings>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(settings: Arc<AgentSettings>) -> Self {
        Self {
            settings,
            start_time: std::time::Instant::now(),
        }
    }

    fn agent_check(&self) -> &'static str {
        if self.settings.is_configured() {
            "ok"
        } else {
            "not_configured"
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            checks: HealthChecks {
                config: "ok".to_string(),
                agent: self.agent_check().to_string(),
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Readiness check - ready once an agent id and alias are configured
    pub async fn ready(&self) -> impl IntoResponse {
        if self.settings.is_configured() {
            (StatusCode::OK, Json(serde_json::json!({
                "status": "ready",
                "message": "Agent is configured"
            })))
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({
                "status": "not_ready",
                "message": "AGENT_ID and AGENT_ALIAS_ID must be configured"
            })))
        }
    }

    /// Liveness check - returns 200 if server is alive
    pub async fn live(&self) -> impl IntoResponse {
        (StatusCode::OK, Json(serde_json::json!({
            "status": "alive",
            "message": "Server is alive"
        })))
    }
}
