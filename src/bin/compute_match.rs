use anyhow::{Context, Result};
use ats_uploader::matching::compute_match;
use ats_uploader::store::SupabaseStore;
use ats_uploader::{logging, Config};
use clap::Parser;

/// Score a candidate against a job's mandatory skills and store the screening row.
#[derive(Parser)]
#[command(name = "compute_match")]
struct Cli {
    candidate_id: String,
    job_id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    logging::init(env!("CARGO_CRATE_NAME"), &config.rust_log);

    let store = SupabaseStore::new(config.supabase()?).context("Failed to build database client")?;

    println!("🔍 Matching candidate {} with job {}...", cli.candidate_id, cli.job_id);
    let row = compute_match(&store, &cli.candidate_id, &cli.job_id)
        .await
        .context("Failed to compute semantic match")?;

    println!("✅ Screening matrix updated. Score: {}%", row.semantic_match_score);
    Ok(())
}
