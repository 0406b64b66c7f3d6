use crate::upload::gateway::IngestionGateway;
use crate::upload::types::{FileDescriptor, SourceType, UploadOutcome, UploadRequest, UploadResult};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct IngestionReceipt {
    #[serde(default)]
    ingestion_id: Option<serde_json::Value>,
}

/// Uploads one file and classifies what happened. Cheap to clone; every
/// worker holds its own copy of the shared, read-only settings.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn IngestionGateway>,
    company_id: Arc<str>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn IngestionGateway>, company_id: impl Into<Arc<str>>) -> Self {
        Self {
            gateway,
            company_id: company_id.into(),
        }
    }

    /// Never fails: every problem ends up in the returned outcome.
    pub async fn dispatch(&self, file: &FileDescriptor) -> UploadResult {
        tracing::debug!(index = file.index, file = %file.name, "sending");

        let file_bytes = match tokio::fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                return UploadResult::exception(file, format!("Failed to read file: {e}"));
            }
        };

        let request = UploadRequest {
            company_id: self.company_id.to_string(),
            source_type: SourceType::ManualUpload,
            file_name: file.name.clone(),
            file_bytes,
        };

        let reply = match self.gateway.submit(request).await {
            Ok(reply) => reply,
            Err(e) => return UploadResult::exception(file, e.to_string()),
        };

        if !reply.is_success() {
            return UploadResult::new(
                file,
                UploadOutcome::HttpError {
                    status: reply.status,
                },
            );
        }

        match serde_json::from_slice::<IngestionReceipt>(&reply.body) {
            Ok(receipt) => UploadResult::new(
                file,
                UploadOutcome::Success {
                    ingestion_id: receipt.ingestion_id.and_then(id_to_string),
                },
            ),
            Err(e) => {
                UploadResult::exception(file, format!("Failed to parse upload response: {e}"))
            }
        }
    }
}

// ids may come back as strings or numbers
fn id_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
