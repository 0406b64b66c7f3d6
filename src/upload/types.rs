use std::fmt;
use std::path::PathBuf;

/// One file picked for upload, with its 1-based position in the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: PathBuf,
    pub name: String,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    ManualUpload,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::ManualUpload => "MANUAL_UPLOAD",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the gateway needs for a single document.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub company_id: String,
    pub source_type: SourceType,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success { ingestion_id: Option<String> },
    HttpError { status: u16 },
    Exception { message: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub index: usize,
    pub file_name: String,
    pub outcome: UploadOutcome,
}

impl UploadResult {
    pub fn new(file: &FileDescriptor, outcome: UploadOutcome) -> Self {
        Self {
            index: file.index,
            file_name: file.name.clone(),
            outcome,
        }
    }

    pub fn exception(file: &FileDescriptor, message: impl Into<String>) -> Self {
        Self::new(
            file,
            UploadOutcome::Exception {
                message: message.into(),
            },
        )
    }
}
