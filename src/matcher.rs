//! Caption matching pipeline: prepare the upload, embed it, rank the caption
//! set against it.
//!
//! The matcher owns the loaded engine plus the precomputed caption embedding
//! matrix; one instance serves the whole process.

use serde::Serialize;
use thiserror::Error;

use crate::captions::CANDIDATE_CAPTIONS;
use crate::embed::{image, ClipEngine, EmbedConfig, EmbedError};
use crate::rank::{rank_by_cosine, RankError};

/// Errors that can occur while running an upload through the pipeline.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Rank(#[from] RankError),
}

/// One caption match: 1-based rank, caption text, cosine confidence in
/// `[-1, 1]`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedCaption {
    pub rank: usize,
    pub caption: &'static str,
    pub confidence: f32,
}

/// Matches uploaded images against the fixed caption set.
pub struct CaptionMatcher {
    engine: ClipEngine,
    caption_vectors: Vec<Vec<f32>>,
}

impl CaptionMatcher {
    /// Load the embedding engine and precompute the caption matrix.
    ///
    /// The caption set is immutable for the process lifetime, so its
    /// embeddings are computed once here instead of once per request.
    pub fn load(cfg: &EmbedConfig) -> Result<Self, MatchError> {
        let engine = ClipEngine::load(cfg)?;
        let caption_vectors = engine.encode_texts(CANDIDATE_CAPTIONS)?;
        tracing::info!(
            model = %engine.model_name(),
            captions = caption_vectors.len(),
            stub = engine.is_stub(),
            "caption matcher ready"
        );
        Ok(Self {
            engine,
            caption_vectors,
        })
    }

    /// Decode `payload`, embed it, and return the `top_k` closest captions in
    /// descending confidence order, ranks starting at 1.
    pub fn analyze(&self, payload: &[u8], top_k: usize) -> Result<Vec<RankedCaption>, MatchError> {
        let img = image::prepare(payload)?;
        let query = self.engine.encode_image(&img)?;
        let ranked = rank_by_cosine(&query, &self.caption_vectors, top_k)?;

        Ok(ranked
            .iter()
            .enumerate()
            .map(|(i, r)| RankedCaption {
                rank: i + 1,
                caption: CANDIDATE_CAPTIONS[r.index],
                confidence: r.score,
            })
            .collect())
    }

    /// Access to the underlying engine (used by readiness probes).
    pub fn engine(&self) -> &ClipEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn stub_matcher() -> CaptionMatcher {
        CaptionMatcher::load(&EmbedConfig::stub()).unwrap()
    }

    fn png_payload(seed: u8) -> Vec<u8> {
        let img = RgbImage::from_fn(24, 24, |x, y| {
            ::image::Rgb([seed, (x * 10) as u8, (y * 10) as u8])
        });
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn analyze_returns_top_k_ranked_captions() {
        let matcher = stub_matcher();
        let results = matcher.analyze(&png_payload(42), 5).unwrap();

        assert_eq!(results.len(), 5);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.rank, i + 1);
            assert!((-1.0..=1.0).contains(&result.confidence));
        }
        for pair in results.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn analyze_is_deterministic() {
        let matcher = stub_matcher();
        let payload = png_payload(7);
        let first = matcher.analyze(&payload, 5).unwrap();
        let second = matcher.analyze(&payload, 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn analyze_caps_results_at_caption_count() {
        let matcher = stub_matcher();
        let results = matcher.analyze(&png_payload(1), 500).unwrap();
        assert_eq!(results.len(), CANDIDATE_CAPTIONS.len());
    }

    #[test]
    fn analyze_rejects_undecodable_payload() {
        use crate::embed::EmbedError;

        let matcher = stub_matcher();
        let err = matcher.analyze(b"not an image", 5).unwrap_err();
        assert!(matches!(err, MatchError::Embed(EmbedError::Decode(_))));
    }

    #[test]
    fn matcher_caches_one_vector_per_caption() {
        let matcher = stub_matcher();
        assert_eq!(matcher.caption_vectors.len(), CANDIDATE_CAPTIONS.len());
    }
}
