//! Offline classifier
//!
//! Classifies an existing flow CSV with the same artifacts the server uses,
//! writes the annotated CSV and prints the per-label counts.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowguard::config::load_env_filter;
use flowguard::model::ArtifactBundle;
use flowguard::pipeline::classify::classify_file;
use flowguard::Config;

#[derive(Parser, Debug)]
#[command(name = "flowguard-classify", version, about = "Classify a cicflowmeter CSV")]
struct Args {
    /// Flow CSV produced by cicflowmeter
    input: PathBuf,

    /// Annotated output CSV (defaults to <input>_with_pred.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Artifact directory (defaults to OUTPUT_DIR / ./outputs)
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Artifact file prefix
    #[arg(long)]
    prefix: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(load_env_filter(None, "flowguard=info"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(dir) = args.artifacts {
        config.output_dir = dir;
    }
    if let Some(prefix) = args.prefix {
        config.artifact_prefix = prefix;
    }

    // Offline runs need the model; there is no UNKNOWN fallback here
    let bundle = ArtifactBundle::load(&config.artifact_paths())?;
    let report = classify_file(&args.input, args.output.as_deref(), &bundle)?;

    println!("Saved predictions to {}", report.output.display());
    for (label, count) in report.counts {
        println!("{:<24}{}", label, count);
    }

    Ok(())
}
