use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;

/// Encode one text, truncated or padded to `max_len`. Returns `[1, max_len]`
/// input ids and attention mask.
pub fn tokenize_on_device(tokenizer: &Tokenizer, text: &str, max_len: usize, pad_id: u32, device: &Device) -> Result<(Tensor, Tensor)> {
    let enc = tokenizer.encode(text, true).map_err(|e| anyhow!("Tokenization failed: {}", e))?;
    let mut ids = enc.get_ids().to_vec();
    let mut mask = enc.get_attention_mask().to_vec();
    if ids.len() > max_len { ids.truncate(max_len); mask.truncate(max_len); }
    if ids.len() < max_len { let pad = max_len - ids.len(); ids.extend(std::iter::repeat(pad_id).take(pad)); mask.extend(std::iter::repeat(0).take(pad)); }
    let input_ids = Tensor::from_iter(ids, device)?.reshape((1, max_len))?;
    let attention_mask = Tensor::from_iter(mask, device)?.reshape((1, max_len))?;
    Ok((input_ids, attention_mask))
}

/// Encode a batch; every row is padded to `max_len`. Returns `[B, max_len]` tensors.
pub fn tokenize_batch(tokenizer: &Tokenizer, texts: &[String], max_len: usize, pad_id: u32, device: &Device) -> Result<(Tensor, Tensor)> {
    let mut ids = Vec::with_capacity(texts.len());
    let mut masks = Vec::with_capacity(texts.len());
    for text in texts {
        let (i, m) = tokenize_on_device(tokenizer, text, max_len, pad_id, device)?;
        ids.push(i);
        masks.push(m);
    }
    Ok((Tensor::cat(&ids, 0)?, Tensor::cat(&masks, 0)?))
}
