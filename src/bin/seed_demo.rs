use anyhow::{Context, Result};
use ats_uploader::seed::{seed_demo, DemoDataset};
use ats_uploader::store::SupabaseStore;
use ats_uploader::{logging, Config};
use clap::Parser;

/// Insert a demo job, three candidates and their screening rows.
#[derive(Parser)]
#[command(name = "seed_demo")]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    Cli::parse();
    let config = Config::from_env()?;
    logging::init(env!("CARGO_CRATE_NAME"), &config.rust_log);

    let store = SupabaseStore::new(config.supabase()?).context("Failed to build database client")?;
    let dataset = DemoDataset::new(&config.company_id);

    let report = seed_demo(&store, &dataset)
        .await
        .context("Failed to seed demo data")?;

    println!("✅ Job created: {}", report.job_title);
    for (name, score) in &report.candidates {
        println!("👤 Candidate inserted: {name} (Score: {score}%)");
    }
    println!("\n🚀 Demo data ready! Open http://localhost:3000 to see the dashboard.");
    Ok(())
}
