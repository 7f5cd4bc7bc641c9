//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `pages`: the static upload page
//! - `analyze`: caption ranking for uploaded images
//! - `health`: liveness and readiness probes

pub mod analyze;
pub mod health;
pub mod pages;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// 404 Not Found handler
///
/// Returns the standard error body shape for undefined routes.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "not found",
        })),
    )
}
