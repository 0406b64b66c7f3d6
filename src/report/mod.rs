mod summary;

pub use summary::BatchSummary;

use crate::error::Error;
use crate::upload::{UploadOutcome, UploadResult};
use std::io::Write;
use std::path::Path;

/// Prints one status line per upload plus the batch banners. Output errors
/// are dropped so reporting can never fail a batch.
pub struct Reporter<W: Write> {
    out: W,
    summary: BatchSummary,
}

impl Reporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            summary: BatchSummary::default(),
        }
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn starting(&mut self, dir: &Path) {
        self.line(format!("🚀 Starting bulk ingestion from directory: {}", dir.display()));
    }

    pub fn files_found(&mut self, total: usize, limit: usize) {
        self.summary = BatchSummary::new(total);
        self.line(format!("📁 Found {total} valid files."));
        self.line(format!("📁 Processing {total} files with concurrency of {limit}..."));
    }

    pub fn fatal(&mut self, error: &Error) {
        self.line(format!("❌ Error: {error}."));
    }

    pub fn record(&mut self, result: &UploadResult) {
        self.summary.record(result);
        let tag = format!("[{}/{}]", result.index, self.summary.total);

        let line = match &result.outcome {
            UploadOutcome::Success { ingestion_id } => {
                let id = ingestion_id.as_deref().unwrap_or("unknown");
                tracing::info!(index = result.index, file = %result.file_name, ingestion_id = id, "uploaded");
                format!("{tag} ✅ {}: Success (ID: {id})", result.file_name)
            }
            UploadOutcome::HttpError { status } => {
                tracing::warn!(index = result.index, file = %result.file_name, status, "gateway rejected upload");
                format!("{tag} ❌ {}: Error ({status})", result.file_name)
            }
            UploadOutcome::Exception { message } => {
                tracing::warn!(index = result.index, file = %result.file_name, error = %message, "upload failed");
                format!("{tag} 💥 {}: Failed: {message}", result.file_name)
            }
        };
        self.line(line);

        tracing::debug!(
            progress = format!("{:.0}%", self.summary.progress_percentage() * 100.0),
            "{}",
            self.summary.status_text()
        );
    }

    pub fn finished(&mut self) {
        let summary = &self.summary;
        let line = format!(
            "\n🏁 Bulk ingestion finished: {} succeeded, {} failed ({} HTTP errors, {} exceptions).",
            summary.successful,
            summary.failed(),
            summary.http_errors,
            summary.exceptions
        );
        self.line(line);
    }

    fn line(&mut self, text: String) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(index: usize, name: &str, outcome: UploadOutcome) -> UploadResult {
        UploadResult {
            index,
            file_name: name.into(),
            outcome,
        }
    }

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_lines_distinguish_outcomes() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.files_found(3, 10);
        reporter.record(&result(
            2,
            "a.pdf",
            UploadOutcome::Success {
                ingestion_id: Some("abc".into()),
            },
        ));
        reporter.record(&result(1, "b.pdf", UploadOutcome::HttpError { status: 500 }));
        reporter.record(&result(
            3,
            "c.pdf",
            UploadOutcome::Exception {
                message: "connection reset".into(),
            },
        ));

        let text = output(reporter);
        assert!(text.contains("Found 3 valid files."));
        assert!(text.contains("concurrency of 10"));
        assert!(text.contains("[2/3] ✅ a.pdf: Success (ID: abc)"));
        assert!(text.contains("[1/3] ❌ b.pdf: Error (500)"));
        assert!(text.contains("[3/3] 💥 c.pdf: Failed: connection reset"));
    }

    #[test]
    fn test_unknown_ingestion_id() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.files_found(1, 10);
        reporter.record(&result(1, "a.pdf", UploadOutcome::Success { ingestion_id: None }));
        assert!(output(reporter).contains("(ID: unknown)"));
    }

    #[test]
    fn test_finished_banner_counts() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.files_found(2, 10);
        reporter.record(&result(1, "a.pdf", UploadOutcome::Success { ingestion_id: None }));
        reporter.record(&result(2, "b.pdf", UploadOutcome::HttpError { status: 403 }));
        reporter.finished();

        assert_eq!(reporter.summary().failed(), 1);
        assert!(output(reporter).contains("1 succeeded, 1 failed (1 HTTP errors, 0 exceptions)"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_write_errors_are_swallowed() {
        let mut reporter = Reporter::new(BrokenPipe);
        reporter.files_found(1, 10);
        reporter.record(&result(1, "a.pdf", UploadOutcome::HttpError { status: 502 }));
        reporter.finished();
        assert_eq!(reporter.summary().http_errors, 1);
    }
}
