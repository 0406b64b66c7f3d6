use crate::upload::{UploadOutcome, UploadResult};

/// Running tally of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
    pub successful: usize,
    pub http_errors: usize,
    pub exceptions: usize,
}

impl BatchSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, result: &UploadResult) {
        self.processed += 1;
        match result.outcome {
            UploadOutcome::Success { .. } => self.successful += 1,
            UploadOutcome::HttpError { .. } => self.http_errors += 1,
            UploadOutcome::Exception { .. } => self.exceptions += 1,
        }
    }

    pub fn failed(&self) -> usize {
        self.http_errors + self.exceptions
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn progress_percentage(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f32 / self.total as f32
        }
    }

    pub fn status_text(&self) -> String {
        format!(
            "Progress: {}/{} files | ✅ Success: {} | ❌ HTTP errors: {} | 💥 Exceptions: {}",
            self.processed, self.total, self.successful, self.http_errors, self.exceptions
        )
    }
}
