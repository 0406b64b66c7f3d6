use anyhow::Result;
use ats_uploader::smoke::run_smoke_test;
use ats_uploader::{logging, Config};
use clap::Parser;
use std::process::ExitCode;

/// Post a text-only manual upload to the ingestion gateway and print the reply.
#[derive(Parser)]
#[command(name = "ingestion_smoke")]
struct Cli {}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    Cli::parse();
    let config = Config::from_env()?;
    logging::init(env!("CARGO_CRATE_NAME"), &config.rust_log);

    println!("Testing manual upload to {}...", config.gateway_url);
    let client = reqwest::Client::new();

    match run_smoke_test(&client, &config.gateway_url, &config.company_id).await {
        Ok(response) => {
            println!("Status: {}", response.status);
            println!("Response: {}", response.body.render());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
