//! CLIP embedding provider.
//!
//! Two operations over one shared embedding space: encode an image, encode a
//! batch of captions. The provider is otherwise opaque; callers get plain
//! `Vec<f32>` vectors back.
//!
//! Backends:
//!
//! - **ONNX** - Runs the exported CLIP pair locally. Requires model files.
//! - **Stub** - Deterministic hash-seeded vectors. Used in tests and whenever
//!   the model assets are missing, so a misconfigured deployment degrades to
//!   a working (if semantically meaningless) service instead of failing every
//!   request.

pub mod config;
pub mod error;
pub mod image;

mod onnx;
mod stub;
mod text;

pub use config::EmbedConfig;
pub use error::EmbedError;

use ::image::DynamicImage;

use crate::embed::onnx::OnnxBackend;

enum Backend {
    Onnx(Box<OnnxBackend>),
    Stub,
}

/// Joint image/text embedding engine.
///
/// Construction is expensive (two ONNX sessions plus a tokenizer); load once
/// per process and reuse. All methods take `&self` and are safe to call from
/// blocking worker threads.
pub struct ClipEngine {
    cfg: EmbedConfig,
    backend: Backend,
}

impl ClipEngine {
    /// Load the engine described by `cfg`.
    ///
    /// `mode = "stub"` selects the deterministic fallback directly. In ONNX
    /// mode, missing model assets also fall back to the stub with a warning
    /// rather than erroring.
    pub fn load(cfg: &EmbedConfig) -> Result<Self, EmbedError> {
        if cfg.mode == "stub" {
            return Ok(Self {
                cfg: cfg.clone(),
                backend: Backend::Stub,
            });
        }

        let assets_present = cfg.vision_model_path.exists()
            && cfg.text_model_path.exists()
            && cfg.tokenizer_path.exists();
        if !assets_present {
            tracing::warn!(
                model = %cfg.model_name,
                vision = %cfg.vision_model_path.display(),
                text = %cfg.text_model_path.display(),
                "model assets missing, falling back to stub embeddings"
            );
            return Ok(Self {
                cfg: cfg.clone(),
                backend: Backend::Stub,
            });
        }

        let backend = OnnxBackend::load(cfg)?;
        tracing::info!(model = %cfg.model_name, "CLIP model pair loaded");
        Ok(Self {
            cfg: cfg.clone(),
            backend: Backend::Onnx(Box::new(backend)),
        })
    }

    /// Encode one prepared image into an embedding vector.
    pub fn encode_image(&self, img: &DynamicImage) -> Result<Vec<f32>, EmbedError> {
        let mut vector = match &self.backend {
            Backend::Onnx(onnx) => onnx.encode_image(img, self.cfg.input_size)?,
            Backend::Stub => stub::stub_vector(img.as_bytes(), self.cfg.embedding_dim),
        };
        if self.cfg.normalize {
            l2_normalize_in_place(&mut vector);
        }
        Ok(vector)
    }

    /// Encode a batch of captions into embedding vectors, one per caption, in
    /// input order.
    pub fn encode_texts(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let mut vectors = match &self.backend {
            Backend::Onnx(onnx) => onnx.encode_texts(texts, self.cfg.max_sequence_length)?,
            Backend::Stub => texts
                .iter()
                .map(|t| stub::stub_vector(t.as_bytes(), self.cfg.embedding_dim))
                .collect(),
        };
        if self.cfg.normalize {
            for vector in &mut vectors {
                l2_normalize_in_place(vector);
            }
        }
        Ok(vectors)
    }

    /// Whether the deterministic stub backend is active.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, Backend::Stub)
    }

    /// Label of the configured model.
    pub fn model_name(&self) -> &str {
        &self.cfg.model_name
    }
}

/// In-place L2 normalization; zero vectors are left untouched.
fn l2_normalize_in_place(v: &mut [f32]) {
    let norm_sq: f32 = v.iter().map(|x| x * x).sum();
    if norm_sq > 0.0 {
        let inv_norm = norm_sq.sqrt().recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}
