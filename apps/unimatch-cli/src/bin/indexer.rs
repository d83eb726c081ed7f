use std::time::Instant;

use tracing_subscriber::EnvFilter;

use unimatch_core::config::Config;
use unimatch_hybrid::RecommendationSystem;

/// Build every configured track up front so the embedding cache is warm.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let embedding = config.embedding()?;
    println!("unimatch indexer\n================");
    match &embedding.cache_dir {
        Some(dir) => println!("Embedding cache: {dir}"),
        None => println!("⚠️  embedding.cache_dir is not set; vectors will not be persisted"),
    }

    let start = Instant::now();
    let system = RecommendationSystem::from_config(&config)?;
    let ready = system.warm_up();
    let health = system.health_check();
    println!(
        "\n✅ {ready}/{} tracks ready in {:.1}s",
        health.available_tracks.len(),
        start.elapsed().as_secs_f64()
    );
    for track in &health.available_tracks {
        match system.engine(track) {
            Ok(engine) => println!("📊 {track}: {} departments", engine.len()),
            Err(e) => println!("❌ {track}: {e}"),
        }
    }
    Ok(())
}
