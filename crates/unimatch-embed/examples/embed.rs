use std::path::Path;

use unimatch_core::config::EmbeddingSettings;
use unimatch_embed::load_embedder;

fn main() -> anyhow::Result<()> {
    let embedder = load_embedder(&EmbeddingSettings::default(), Path::new("."))?;
    let texts = vec!["bilgisayar mühendisliği".to_string(), "hemşirelik".to_string()];
    let embs = embedder.embed_batch(&texts)?;
    println!("B={} dim={} id={}", embs.len(), embedder.dim(), embedder.embedder_id());
    Ok(())
}
