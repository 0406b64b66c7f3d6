use crate::upload::types::UploadRequest;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build request: {0}")]
    Request(String),

    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Raw answer from the gateway; classification is the dispatcher's job.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl GatewayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The ingestion endpoint as seen by the dispatcher.
#[async_trait]
pub trait IngestionGateway: Send + Sync {
    async fn submit(&self, request: UploadRequest) -> Result<GatewayReply, GatewayError>;
}

/// Posts multipart uploads to a fixed URL.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    url: String,
}

impl HttpGateway {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl IngestionGateway for HttpGateway {
    async fn submit(&self, request: UploadRequest) -> Result<GatewayReply, GatewayError> {
        let part = Part::bytes(request.file_bytes)
            .file_name(request.file_name.clone())
            .mime_str(mime_for(&request.file_name))
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("company_id", request.company_id)
            .text("source_type", request.source_type.as_str());

        let response = self.client.post(&self.url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(GatewayReply { status, body })
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for("cv.PDF"), "application/pdf");
        assert_eq!(mime_for("cv.doc"), "application/msword");
        assert!(mime_for("cv.docx").contains("wordprocessingml"));
        assert_eq!(mime_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_reply_success_range() {
        let reply = |status| GatewayReply {
            status,
            body: Vec::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(202).is_success());
        assert!(!reply(199).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(500).is_success());
    }
}
