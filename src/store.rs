//! Access to the hosted database through its PostgREST interface.

use crate::config::SupabaseConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("no row in '{table}' with id '{id}'")]
    NotFound { table: String, id: String },

    #[error("invalid credentials: {0}")]
    Credentials(String),

    #[error("failed to encode row: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Row-level reads and writes by primary key.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_by_id(&self, table: &str, id: &str) -> Result<Value, StoreError>;

    async fn upsert(&self, table: &str, row: Value) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    rest_url: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Result<Self, StoreError> {
        let key = HeaderValue::from_str(&config.key)
            .map_err(|_| StoreError::Credentials("API key is not a valid header value".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.key))
            .map_err(|_| StoreError::Credentials("API key is not a valid header value".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl RecordStore for SupabaseStore {
    async fn fetch_by_id(&self, table: &str, id: &str) -> Result<Value, StoreError> {
        let eq = format!("eq.{id}");
        let response = self
            .client
            .get(format!("{}/{}", self.rest_url, table))
            .query(&[("select", "*"), ("id", eq.as_str())])
            .header(ACCEPT, "application/vnd.pgrst.object+json")
            .send()
            .await?;

        let status = response.status();
        // PostgREST answers 406 when a single-object request matches no rows.
        if status == StatusCode::NOT_ACCEPTABLE || status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                table: table.to_string(),
                id: id.to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let row = response.json::<Value>().await?;
        tracing::debug!(table, id, "fetched row");
        Ok(row)
    }

    async fn upsert(&self, table: &str, row: Value) -> Result<(), StoreError> {
        let response = self
            .client
            .post(format!("{}/{}", self.rest_url, table))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(table, "upserted row");
        Ok(())
    }
}
