//! Health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use serde::Serialize;
use serde_json::json;

use super::state::AppState;
use crate::api::types::Json;

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
        .route("/live", get(live_check))
}

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: f64,
    pub message: String,
    pub checks: Vec<HealthCheck>,
    pub latency_ms: u64,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        }
    }
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /ping
pub async fn ping() -> impl IntoResponse {
    Json(json!({ "ping": "pong" }))
}

/// GET /health
///
/// Degraded when the LLM provider has no credentials or the output folder
/// cannot be created; the service still answers in both cases.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let checks = vec![check_llm(&state), check_file_system(&state).await];

    let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        message: format!("Service is {}", status.as_str()),
        checks,
        latency_ms: start.elapsed().as_millis() as u64,
    };

    (StatusCode::OK, Json(response))
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

fn check_llm(state: &AppState) -> HealthCheck {
    if state.rewriter.is_configured() {
        HealthCheck {
            name: "llm".to_string(),
            status: HealthStatus::Healthy,
            message: Some(format!("model {}", state.rewriter.model())),
        }
    } else {
        HealthCheck {
            name: "llm".to_string(),
            status: HealthStatus::Degraded,
            message: Some("API key not configured".to_string()),
        }
    }
}

async fn check_file_system(state: &AppState) -> HealthCheck {
    match tokio::fs::create_dir_all(&state.folders.output_dir).await {
        Ok(()) => HealthCheck {
            name: "file_system".to_string(),
            status: HealthStatus::Healthy,
            message: None,
        },
        Err(e) => HealthCheck {
            name: "file_system".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
        },
    }
}
