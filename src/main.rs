use ats_uploader::report::Reporter;
use ats_uploader::upload::{exit_code, run_bulk_ingest, HttpGateway};
use ats_uploader::{logging, Config};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Upload every PDF/DOC/DOCX resume in a directory to the ingestion gateway.
#[derive(Parser)]
#[command(name = "ats_uploader", version)]
struct Cli {
    /// Directory to upload from (defaults to the configured temp directory).
    directory: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {e:#}");
            return ExitCode::from(2);
        }
    };
    logging::init(env!("CARGO_CRATE_NAME"), &config.rust_log);
    tracing::debug!(?config, "configuration loaded");

    let dir = cli.directory.unwrap_or_else(|| config.tmp_dir.clone());
    let gateway = Arc::new(HttpGateway::new(config.gateway_url.clone()));
    let mut reporter = Reporter::stdout();

    let outcome = run_bulk_ingest(&config, &dir, gateway, &mut reporter).await;
    match &outcome {
        Ok(report) => {
            for failed in report.failures() {
                tracing::warn!(index = failed.index, file = %failed.file_name, "not ingested");
            }
        }
        Err(e) => tracing::error!(error = %e, "nothing uploaded"),
    }

    ExitCode::from(exit_code(&outcome))
}
