use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use unimatch_core::config::Config;
use unimatch_hybrid::RecommendationSystem;

#[derive(Parser)]
#[command(name = "unimatch", about = "University department recommendations from a free-text description")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shortlist departments on a program track, printed as JSON
    Recommend {
        track: String,
        query: String,
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        /// Rank window as a fraction of the target rank (0.2 = ±20%)
        #[arg(short, long)]
        tolerance: Option<f64>,
    },
    /// List configured program tracks
    Programs,
    /// Print the health summary; `--warm` builds every track first
    Health {
        #[arg(long)]
        warm: bool,
    },
    /// Show how a query was read and why each department was picked
    Explain {
        track: String,
        query: String,
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        #[arg(short, long)]
        tolerance: Option<f64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let system = RecommendationSystem::from_config(&config)?;
    let defaults = system.settings().clone();

    match cli.command {
        Command::Recommend { track, query, top_k, tolerance } => {
            let recs = system.recommend(
                &track,
                &query,
                top_k.unwrap_or(defaults.default_top_k),
                tolerance.unwrap_or(defaults.default_tolerance),
            )?;
            println!("{}", serde_json::to_string_pretty(&recs)?);
        }
        Command::Programs => {
            for track in system.get_available_programs() {
                println!("{track}");
            }
        }
        Command::Health { warm } => {
            if warm {
                system.warm_up();
            }
            println!("{}", serde_json::to_string_pretty(&system.health_check())?);
        }
        Command::Explain { track, query, top_k, tolerance } => {
            let engine = system.engine(&track)?;
            let parsed = engine.interpret(&query);
            println!("🔍 {query}");
            println!("Interests: {}", parsed.interest_tags.join(", "));
            match parsed.target_rank {
                Some(rank) => println!("Target rank: {rank}"),
                None => println!("Target rank: none (no rank filter)"),
            }
            if !parsed.excluded.is_empty() {
                println!("Rejected: {}", parsed.excluded.join(", "));
            }
            if !parsed.positive.is_empty() {
                println!("Enthusiastic about: {}", parsed.positive.join(", "));
            }
            let recs = engine.recommend(
                &query,
                top_k.unwrap_or(defaults.default_top_k),
                tolerance.unwrap_or(defaults.default_tolerance),
            )?;
            if recs.is_empty() {
                println!("\nNo departments matched.");
            }
            for (i, rec) in recs.iter().enumerate() {
                println!("\n{}. ──────────────\n{}", i + 1, rec.explain());
            }
        }
    }
    Ok(())
}
