use std::io;
use thiserror::Error;

/// Errors surfaced by the embedding provider.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// An ONNX model file could not be located locally.
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    /// The tokenizer JSON is missing or unreadable.
    #[error("tokenizer missing: {0}")]
    TokenizerMissing(String),
    /// Configuration is inconsistent.
    #[error("invalid embed config: {0}")]
    InvalidConfig(String),
    /// The uploaded payload is not a decodable image.
    #[error("image decoding failed: {0}")]
    Decode(String),
    /// ONNX Runtime or tokenizer errors during inference.
    #[error("inference failure: {0}")]
    Inference(String),
    /// Low-level IO failures while touching the filesystem.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
