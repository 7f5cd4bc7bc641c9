use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for the CLIP embedding pair.
///
/// # Example
/// ```no_run
/// use capmatch::embed::{ClipEngine, EmbedConfig};
///
/// let cfg = EmbedConfig {
///     vision_model_path: "./models/clip/vision_model.onnx".into(),
///     text_model_path: "./models/clip/text_model.onnx".into(),
///     tokenizer_path: "./models/clip/tokenizer.json".into(),
///     ..Default::default()
/// };
///
/// let engine = ClipEngine::load(&cfg).unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedConfig {
    /// Backend selector: `"onnx"` runs the local model pair, `"stub"` forces
    /// the deterministic fallback.
    pub mode: String,
    /// Friendly label surfaced in logs.
    pub model_name: String,
    /// Local path of the vision tower ONNX file.
    pub vision_model_path: PathBuf,
    /// Local path of the text tower ONNX file.
    pub text_model_path: PathBuf,
    /// Path to the `tokenizer.json` exported alongside the model pair.
    pub tokenizer_path: PathBuf,
    /// Square input edge expected by the vision tower.
    pub input_size: u32,
    /// Token budget of the text tower; longer captions are truncated.
    pub max_sequence_length: usize,
    /// Normalize vectors to unit length (recommended for cosine similarity).
    pub normalize: bool,
    /// Vector length produced by the stub backend. The ONNX path reports
    /// whatever the model emits.
    pub embedding_dim: usize,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            mode: "onnx".into(),
            model_name: "clip-vit-base-patch32".into(),
            vision_model_path: PathBuf::from("./models/clip-vit-base-patch32/vision_model.onnx"),
            text_model_path: PathBuf::from("./models/clip-vit-base-patch32/text_model.onnx"),
            tokenizer_path: PathBuf::from("./models/clip-vit-base-patch32/tokenizer.json"),
            input_size: 224,
            max_sequence_length: 77,
            normalize: true,
            embedding_dim: 512,
        }
    }
}

impl EmbedConfig {
    /// Configuration pinned to the deterministic stub backend.
    pub fn stub() -> Self {
        Self {
            mode: "stub".into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = EmbedConfig::default();
        assert_eq!(cfg.mode, "onnx");
        assert_eq!(cfg.model_name, "clip-vit-base-patch32");
        assert_eq!(cfg.input_size, 224);
        assert_eq!(cfg.max_sequence_length, 77);
        assert_eq!(cfg.embedding_dim, 512);
        assert!(cfg.normalize);
    }

    #[test]
    fn stub_config_selects_stub_mode() {
        let cfg = EmbedConfig::stub();
        assert_eq!(cfg.mode, "stub");
        assert_eq!(cfg.embedding_dim, 512);
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = EmbedConfig {
            mode: "stub".into(),
            model_name: "test-model".into(),
            normalize: false,
            ..Default::default()
        };

        let serialized = serde_json::to_string(&cfg).unwrap();
        let deserialized: EmbedConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(cfg, deserialized);
    }
}
