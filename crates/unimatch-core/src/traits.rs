/// Text to fixed-dimension vector. Implementations must be deterministic for a
/// given `(text, embedder_id)` and safe to call from several threads at once.
pub trait Embedder: Send + Sync {
    /// Stable identifier for the provider/model (e.g. `local:minilm:d384`).
    fn embedder_id(&self) -> &str;
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    fn embed_one(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("embedder returned no vector"))
    }
}
