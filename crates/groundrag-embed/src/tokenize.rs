use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;

/// Model inputs for a single text, each shaped `[1, T]`.
pub struct EncodedInput {
    pub input_ids: Tensor,
    pub token_type_ids: Tensor,
    pub attention_mask: Tensor,
}

/// Encode `text` with special tokens, truncated to `max_len`. No padding: one
/// sequence per forward pass, so every position is attended.
pub fn tokenize_on_device(tokenizer: &Tokenizer, text: &str, max_len: usize, device: &Device) -> Result<EncodedInput> {
    let enc = tokenizer.encode(text, true).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
    let mut ids = enc.get_ids().to_vec();
    let mut type_ids = enc.get_type_ids().to_vec();
    let mut mask = enc.get_attention_mask().to_vec();
    if ids.len() > max_len {
        ids.truncate(max_len);
        type_ids.truncate(max_len);
        mask.truncate(max_len);
    }
    let len = ids.len();
    Ok(EncodedInput {
        input_ids: Tensor::from_vec(ids, (1, len), device)?,
        token_type_ids: Tensor::from_vec(type_ids, (1, len), device)?,
        attention_mask: Tensor::from_vec(mask, (1, len), device)?,
    })
}
