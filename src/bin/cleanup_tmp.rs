use anyhow::{Context, Result};
use ats_uploader::cleanup::{clean_dir, CleanupOutcome};
use ats_uploader::{logging, Config};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Delete everything inside the temp directory.
#[derive(Parser)]
#[command(name = "cleanup_tmp")]
struct Cli {
    /// Directory to empty (defaults to the configured temp directory).
    directory: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    logging::init(env!("CARGO_CRATE_NAME"), &config.rust_log);

    let dir = cli.directory.unwrap_or(config.tmp_dir);
    let outcome = clean_dir(&dir).with_context(|| format!("Failed to list {}", dir.display()))?;

    match outcome {
        CleanupOutcome::Missing => {
            println!("Temp directory does not exist.");
            Ok(ExitCode::SUCCESS)
        }
        CleanupOutcome::Cleaned { removed, failures } => {
            for (path, error) in &failures {
                println!("Failed to delete {}. Reason: {error}", path.display());
            }
            println!("Cleanup of {} complete: {removed} entries removed.", dir.display());
            Ok(if failures.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
