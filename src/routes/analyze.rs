use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::matcher::RankedCaption;
use crate::state::AppState;

/// Response from a successful analysis
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub results: Vec<RankedCaption>,
}

/// Rank the fixed caption set against a multipart `image` upload.
///
/// # Pipeline Stages
/// 1. **Extract**: Pull the `image` field out of the multipart body
/// 2. **Prepare**: Decode to RGB, downscale oversized images
/// 3. **Embed**: Vision tower forward pass (model loads on first request)
/// 4. **Rank**: Cosine similarity against the cached caption matrix
///
/// # Example
/// ```json
/// // Response
/// {
///   "success": true,
///   "results": [
///     { "rank": 1, "caption": "A refreshing beverage.", "confidence": 0.27 },
///     ...
///   ]
/// }
/// ```
///
/// Missing or empty uploads map to 400; any processing failure maps to 500
/// with an `{"error": ...}` body.
pub async fn analyze_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let mut payload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Multipart(e.to_string()))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Multipart(e.to_string()))?;
            payload = Some(bytes);
            break;
        }
    }

    let payload = payload.ok_or(ApiError::MissingImage)?;
    if payload.is_empty() {
        return Err(ApiError::EmptyImage);
    }

    let top_k = state.config.top_k;

    // Model load and both forward passes are CPU-bound; keep them off the
    // async runtime.
    let results =
        tokio::task::spawn_blocking(move || -> Result<Vec<RankedCaption>, ApiError> {
            let matcher = state.matcher()?;
            Ok(matcher.analyze(&payload, top_k)?)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(AnalyzeResponse {
        success: true,
        results,
    }))
}
