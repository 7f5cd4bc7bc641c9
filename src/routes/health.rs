use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

use crate::state::AppState;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "capmatch",
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness check endpoint
///
/// The server is ready as soon as it listens; the matcher loads lazily on the
/// first analysis, so its state is reported as a component rather than
/// gating readiness.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let matcher_status = if state.matcher_loaded() {
        "loaded"
    } else {
        "unloaded"
    };

    Json(json!({
        "status": "ready",
        "service": "capmatch",
        "uptime_seconds": uptime_seconds(),
        "components": {
            "api": "ready",
            "matcher": matcher_status,
        }
    }))
}
