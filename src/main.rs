use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chunk_combo::{
    basis::{DEFAULT_CHUNK_DIR, DEFAULT_OUTPUT_DIR},
    reassemble::{reassemble, Job},
};

/// Combine chunk_<N>.png tiles back into one image.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the chunk_<N>.png tiles
    #[clap(default_value = DEFAULT_CHUNK_DIR)]
    source: PathBuf,

    /// Directory the combined image is written to
    #[clap(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let job = Job::new(args.source, args.output);

    let path = reassemble(&job, Utc::now())
        .with_context(|| format!("failed to combine chunks in {}", job.source_dir.display()))?;

    println!("saved combined image to {}", path.display());
    Ok(())
}
