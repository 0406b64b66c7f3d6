mod dispatcher;
mod file_selector;
mod gateway;
mod pool;
mod types;

pub use dispatcher::Dispatcher;
pub use file_selector::select_files;
pub use gateway::{GatewayError, GatewayReply, HttpGateway, IngestionGateway};
pub use pool::UploadPool;
pub use types::{FileDescriptor, SourceType, UploadOutcome, UploadRequest, UploadResult};

use crate::config::Config;
use crate::error::Result;
use crate::report::{BatchSummary, Reporter};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// A finished batch: the counters plus every file's result in batch order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub results: Vec<UploadResult>,
}

impl BatchReport {
    pub fn failures(&self) -> impl Iterator<Item = &UploadResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }
}

/// Process exit status for a batch: 0 when every file went through (an empty
/// directory included), 1 when any file failed, 2 when nothing could be
/// uploaded at all.
pub fn exit_code(outcome: &Result<BatchReport>) -> u8 {
    match outcome {
        Ok(report) if report.summary.has_failures() => 1,
        Ok(_) => 0,
        Err(_) => 2,
    }
}

/// Runs one batch: select the files in `dir`, upload them through `gateway`
/// and report each outcome. Only an unusable directory is fatal.
pub async fn run_bulk_ingest<W: Write>(
    config: &Config,
    dir: &Path,
    gateway: Arc<dyn IngestionGateway>,
    reporter: &mut Reporter<W>,
) -> Result<BatchReport> {
    reporter.starting(dir);

    let files = match select_files(dir, &config.allowed_extensions) {
        Ok(files) => files,
        Err(e) => {
            reporter.fatal(&e);
            return Err(e);
        }
    };

    tracing::info!(
        dir = %dir.display(),
        files = files.len(),
        workers = config.worker_limit,
        "starting batch"
    );
    reporter.files_found(files.len(), config.worker_limit);

    let dispatcher = Dispatcher::new(gateway, config.company_id.as_str());
    let pool = UploadPool::new(dispatcher, config.worker_limit);
    let results = pool.run(files, |result| reporter.record(result)).await;

    reporter.finished();
    Ok(BatchReport {
        summary: reporter.summary().clone(),
        results,
    })
}
