//! Caption tokenization for the text tower.

use tokenizers::Tokenizer;

use crate::embed::EmbedError;

/// A tokenized caption batch padded to one shared sequence length, laid out
/// row-major for a `[batch, seq_len]` tensor.
#[derive(Debug)]
pub(crate) struct EncodedBatch {
    pub ids: Vec<i64>,
    pub mask: Vec<i64>,
    pub batch: usize,
    pub seq_len: usize,
}

/// Tokenize `texts` and pad them to a shared sequence length, truncating
/// anything beyond `max_sequence_length`.
pub(crate) fn encode_batch(
    tokenizer: &Tokenizer,
    texts: &[&str],
    max_sequence_length: usize,
) -> Result<EncodedBatch, EmbedError> {
    let mut encoded = Vec::with_capacity(texts.len());
    for text in texts {
        let encoding = tokenizer
            .encode(*text, true)
            .map_err(|e| EmbedError::Inference(e.to_string()))?;
        let mut ids: Vec<i64> = encoding.get_ids().iter().map(|&x| x as i64).collect();
        let mut mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&x| x as i64)
            .collect();
        if ids.len() > max_sequence_length {
            ids.truncate(max_sequence_length);
            mask.truncate(max_sequence_length);
        }
        encoded.push((ids, mask));
    }
    pad_batch(encoded)
}

/// Pad per-text id/mask rows to the longest row. Padding ids are zeroes with a
/// zeroed attention mask.
fn pad_batch(encoded: Vec<(Vec<i64>, Vec<i64>)>) -> Result<EncodedBatch, EmbedError> {
    let batch = encoded.len();
    let seq_len = encoded
        .iter()
        .map(|(ids, _)| ids.len())
        .max()
        .unwrap_or(0)
        .max(1);

    let mut id_storage = Vec::with_capacity(batch * seq_len);
    let mut mask_storage = Vec::with_capacity(batch * seq_len);

    for (ids, mask) in encoded {
        if ids.len() != mask.len() {
            return Err(EmbedError::Inference(
                "tokenizer produced mismatched id/mask lengths".into(),
            ));
        }
        let pad = seq_len - ids.len();
        id_storage.extend(ids);
        mask_storage.extend(mask);
        id_storage.extend(std::iter::repeat(0).take(pad));
        mask_storage.extend(std::iter::repeat(0).take(pad));
    }

    Ok(EncodedBatch {
        ids: id_storage,
        mask: mask_storage,
        batch,
        seq_len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_batch_aligns_rows_to_longest() {
        let batch = pad_batch(vec![
            (vec![1, 2, 3], vec![1, 1, 1]),
            (vec![4], vec![1]),
        ])
        .unwrap();

        assert_eq!(batch.batch, 2);
        assert_eq!(batch.seq_len, 3);
        assert_eq!(batch.ids, vec![1, 2, 3, 4, 0, 0]);
        assert_eq!(batch.mask, vec![1, 1, 1, 1, 0, 0]);
    }

    #[test]
    fn pad_batch_rejects_mismatched_rows() {
        let err = pad_batch(vec![(vec![1, 2], vec![1])]).unwrap_err();
        assert!(matches!(err, EmbedError::Inference(_)));
    }

    #[test]
    fn pad_batch_empty_input_yields_empty_batch() {
        let batch = pad_batch(Vec::new()).unwrap();
        assert_eq!(batch.batch, 0);
        assert_eq!(batch.seq_len, 1);
        assert!(batch.ids.is_empty());
    }
}
