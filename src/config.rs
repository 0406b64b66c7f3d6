use anyhow::{Context, Result};
use derivative::Derivative;
use std::path::PathBuf;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000/api/ingestion/process";
pub const DEFAULT_COMPANY_ID: &str = "00000000-0000-0000-0000-000000000001";
pub const DEFAULT_TMP_DIR: &str = "../.tmp";
pub const DEFAULT_WORKER_LIMIT: usize = 10;
const MAX_WORKER_LIMIT: usize = 64;
const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

/// Credentials for the Supabase REST API. Only the store-backed commands
/// (match scoring, seeding) need these.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct SupabaseConfig {
    pub url: String,
    #[derivative(Debug = "ignore")]
    pub key: String,
}

/// Process-wide settings, built once in `main` and handed to each component.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Config {
    pub gateway_url: String,
    pub company_id: String,
    pub worker_limit: usize,
    pub allowed_extensions: Vec<String>,
    pub tmp_dir: PathBuf,
    pub supabase: Option<SupabaseConfig>,
    pub rust_log: String,
}

impl Config {
    /// Loads `.env` files (all optional) and then reads the process environment.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var("ATS_ENV_FILE") {
            dotenvy::from_filename(&path)
                .with_context(|| format!("Failed to load env file '{path}'"))?;
        } else {
            dotenvy::from_filename("../intelligent-ats/.env").ok();
        }
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let worker_limit = match lookup("ATS_UPLOAD_WORKERS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("ATS_UPLOAD_WORKERS must be a positive integer, got '{raw}'"))?
                .clamp(1, MAX_WORKER_LIMIT),
            None => DEFAULT_WORKER_LIMIT,
        };

        let supabase = match lookup("NEXT_PUBLIC_SUPABASE_URL") {
            Some(url) if !url.is_empty() => {
                let key = lookup("SUPABASE_SERVICE_ROLE_KEY")
                    .or_else(|| lookup("NEXT_PUBLIC_SUPABASE_ANON_KEY"))
                    .filter(|k| !k.is_empty());
                key.map(|key| SupabaseConfig {
                    url: url.trim_end_matches('/').to_string(),
                    key,
                })
            }
            _ => None,
        };

        Ok(Config {
            gateway_url: lookup("INGESTION_GATEWAY_URL")
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
            company_id: lookup("ATS_COMPANY_ID").unwrap_or_else(|| DEFAULT_COMPANY_ID.to_string()),
            worker_limit,
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            tmp_dir: lookup("ATS_TMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TMP_DIR)),
            supabase,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn supabase(&self) -> Result<&SupabaseConfig> {
        self.supabase.as_ref().context(
            "NEXT_PUBLIC_SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY (or NEXT_PUBLIC_SUPABASE_ANON_KEY) must be set",
        )
    }
}
