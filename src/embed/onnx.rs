//! ONNX Runtime plumbing for the CLIP towers.
//!
//! Sessions need exclusive access at run time, so each tower sits behind a
//! mutex; requests serialize on inference. Input and output names are read
//! from the session metadata at load time rather than hard-coded, since CLIP
//! exports disagree on naming.

use std::path::Path;
use std::sync::Mutex;

use ::image::DynamicImage;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::{Session, SessionOutputs};
use ort::value::Value;
use tokenizers::Tokenizer;

use crate::embed::text::encode_batch;
use crate::embed::{image, EmbedConfig, EmbedError};

/// Loaded CLIP pair: vision tower, text tower, tokenizer.
pub(crate) struct OnnxBackend {
    vision: Mutex<Session>,
    text: Mutex<Session>,
    tokenizer: Tokenizer,
    vision_output: String,
    text_output: String,
    text_wants_mask: bool,
}

impl OnnxBackend {
    pub(crate) fn load(cfg: &EmbedConfig) -> Result<Self, EmbedError> {
        let tokenizer = Tokenizer::from_file(&cfg.tokenizer_path)
            .map_err(|e| EmbedError::TokenizerMissing(e.to_string()))?;

        let vision = create_session(&cfg.vision_model_path)?;
        let text = create_session(&cfg.text_model_path)?;

        let vision_output = embedding_output_name(&vision, &["image_embeds", "pooler_output"])?;
        let text_output = embedding_output_name(&text, &["text_embeds", "pooler_output"])?;
        let text_wants_mask = text.inputs().iter().any(|i| i.name() == "attention_mask");

        Ok(Self {
            vision: Mutex::new(vision),
            text: Mutex::new(text),
            tokenizer,
            vision_output,
            text_output,
            text_wants_mask,
        })
    }

    pub(crate) fn encode_image(
        &self,
        img: &DynamicImage,
        input_size: u32,
    ) -> Result<Vec<f32>, EmbedError> {
        let pixels = image::to_tensor(img, input_size);
        let input = Value::from_array(pixels).map_err(ort_err)?;

        let mut session = self.vision.lock().unwrap_or_else(|p| p.into_inner());
        let outputs = session
            .run(ort::inputs!["pixel_values" => input])
            .map_err(ort_err)?;

        let mut vectors = extract_batch(&outputs, &self.vision_output, 1)?;
        vectors
            .pop()
            .ok_or_else(|| EmbedError::Inference("vision tower returned no outputs".into()))
    }

    pub(crate) fn encode_texts(
        &self,
        texts: &[&str],
        max_sequence_length: usize,
    ) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batch = encode_batch(&self.tokenizer, texts, max_sequence_length)?;
        let shape = vec![batch.batch, batch.seq_len];
        let ids = Value::from_array((shape.clone(), batch.ids)).map_err(ort_err)?;

        let mut session = self.text.lock().unwrap_or_else(|p| p.into_inner());
        let outputs = if self.text_wants_mask {
            let mask = Value::from_array((shape, batch.mask)).map_err(ort_err)?;
            session
                .run(ort::inputs!["input_ids" => ids, "attention_mask" => mask])
                .map_err(ort_err)?
        } else {
            session
                .run(ort::inputs!["input_ids" => ids])
                .map_err(ort_err)?
        };

        extract_batch(&outputs, &self.text_output, batch.batch)
    }
}

fn ort_err(e: ort::Error) -> EmbedError {
    EmbedError::Inference(e.to_string())
}

fn create_session(model_path: &Path) -> Result<Session, EmbedError> {
    Session::builder()
        .map_err(ort_err)?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(ort_err)?
        .with_intra_threads(4)
        .map_err(ort_err)?
        .commit_from_file(model_path)
        .map_err(ort_err)
}

/// Pick the output holding the embeddings: prefer the names CLIP exports use,
/// fall back to the first declared output.
fn embedding_output_name(session: &Session, preferred: &[&str]) -> Result<String, EmbedError> {
    for name in preferred {
        if session.outputs().iter().any(|o| o.name() == *name) {
            return Ok((*name).to_string());
        }
    }
    session
        .outputs()
        .first()
        .map(|o| o.name().to_string())
        .ok_or_else(|| EmbedError::Inference("model declares no outputs".into()))
}

/// Split a `[batch, dim]` output into per-item vectors. Token-level
/// `[batch, seq, dim]` outputs are mean-pooled over the sequence axis.
fn extract_batch(
    outputs: &SessionOutputs,
    name: &str,
    batch: usize,
) -> Result<Vec<Vec<f32>>, EmbedError> {
    let value = outputs
        .get(name)
        .ok_or_else(|| EmbedError::Inference(format!("model output '{name}' missing")))?;
    let (shape, data) = value.try_extract_tensor::<f32>().map_err(ort_err)?;
    let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();

    match dims.as_slice() {
        [b, dim] if *b == batch => Ok(data.chunks(*dim).map(|c| c.to_vec()).collect()),
        [b, seq, dim] if *b == batch => {
            let mut vectors = Vec::with_capacity(batch);
            for item in data.chunks(*seq * *dim) {
                let mut pooled = vec![0.0f32; *dim];
                for token in item.chunks(*dim) {
                    for (p, &v) in pooled.iter_mut().zip(token) {
                        *p += v;
                    }
                }
                for p in &mut pooled {
                    *p /= *seq as f32;
                }
                vectors.push(pooled);
            }
            Ok(vectors)
        }
        other => Err(EmbedError::Inference(format!(
            "unexpected embedding output shape {other:?}"
        ))),
    }
}
