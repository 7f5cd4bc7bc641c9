//! capmatch - HTTP service matching uploaded images against a fixed caption set
//!
//! The service computes a joint image/text embedding with a pretrained CLIP
//! model pair (vision tower + text tower, executed through ONNX Runtime),
//! ranks a fixed list of candidate captions by cosine similarity to the
//! uploaded image, and returns the top five matches with confidence scores.
//!
//! # Features
//!
//! - **Lazy model loading**: the CLIP pair is loaded on the first request and
//!   reused for the process lifetime; caption embeddings are computed once at
//!   load time.
//! - **Stub fallback**: when model assets are absent the engine degrades to a
//!   deterministic stub backend so the API contract stays testable.
//! - **Middleware**: compression, CORS, request ID tracking, structured logging
//! - **Configuration**: environment variable and file-based configuration
//! - **Graceful shutdown**: proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use capmatch::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     capmatch::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Static upload page
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `POST /analyze` - Rank the caption set against a multipart `image` upload

pub mod captions;
pub mod config;
pub mod embed;
pub mod error;
pub mod matcher;
pub mod middleware;
pub mod rank;
pub mod routes;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use matcher::{CaptionMatcher, MatchError, RankedCaption};
pub use server::{build_router, start_server};
pub use state::AppState;
