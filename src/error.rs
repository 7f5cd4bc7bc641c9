use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::embed::EmbedError;
use crate::matcher::MatchError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Request-level error types, mapped to HTTP status codes at the boundary.
///
/// Client mistakes (missing or empty upload, malformed multipart) map to 400;
/// every processing failure maps to 500. Server-side failures surface a stable
/// category message to the client while the full error chain goes to the log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no image uploaded")]
    MissingImage,

    #[error("no image selected")]
    EmptyImage,

    #[error("malformed multipart request: {0}")]
    Multipart(String),

    #[error("embedding provider error: {0}")]
    Embed(#[from] EmbedError),

    #[error("match pipeline error: {0}")]
    Match(#[from] MatchError),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::EmptyImage | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Embed(_) | ApiError::Match(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message surfaced in the JSON body. Client errors echo their exact
    /// message; server errors surface a stable category phrase and keep the
    /// raw error text out of the response.
    fn public_message(&self) -> String {
        match self {
            ApiError::MissingImage | ApiError::EmptyImage | ApiError::Multipart(_) => {
                self.to_string()
            }
            ApiError::Embed(e) | ApiError::Match(MatchError::Embed(e)) => {
                format!("error processing image: {}", embed_category(e))
            }
            ApiError::Match(MatchError::Rank(_)) => {
                "error processing image: similarity ranking failed".to_string()
            }
            ApiError::Internal(_) => "internal server error".to_string(),
        }
    }
}

fn embed_category(err: &EmbedError) -> &'static str {
    match err {
        EmbedError::Decode(_) => "could not decode image",
        EmbedError::ModelNotFound(_) | EmbedError::TokenizerMissing(_) => {
            "model assets unavailable"
        }
        EmbedError::InvalidConfig(_) => "embedding provider misconfigured",
        EmbedError::Inference(_) => "embedding inference failed",
        EmbedError::Io(_) => "embedding provider io failure",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": self.public_message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(
            ApiError::MissingImage.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::EmptyImage.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Multipart("truncated".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn processing_errors_map_to_500() {
        let decode = ApiError::Embed(EmbedError::Decode("not an image".into()));
        assert_eq!(decode.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let rank = ApiError::Match(MatchError::Rank(crate::rank::RankError::ZeroQuery));
        assert_eq!(rank.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let internal = ApiError::Internal("worker panicked".into());
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_errors_surface_their_message() {
        assert_eq!(ApiError::MissingImage.public_message(), "no image uploaded");
        assert_eq!(ApiError::EmptyImage.public_message(), "no image selected");
    }

    #[test]
    fn server_errors_hide_internal_detail() {
        let err = ApiError::Embed(EmbedError::Inference(
            "ort: /secret/path/model.onnx failed".into(),
        ));
        let msg = err.public_message();
        assert!(msg.contains("embedding inference failed"));
        assert!(!msg.contains("/secret/path"));
    }
}
