use crate::upload::dispatcher::Dispatcher;
use crate::upload::types::{FileDescriptor, UploadResult};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fans a batch out over at most `limit` concurrent uploads.
pub struct UploadPool {
    dispatcher: Dispatcher,
    limit: usize,
}

impl UploadPool {
    pub fn new(dispatcher: Dispatcher, limit: usize) -> Self {
        Self {
            dispatcher,
            limit: limit.max(1),
        }
    }

    /// Uploads every file and waits for all of them. `on_result` sees results
    /// in completion order; the returned vector is ordered by batch index and
    /// holds exactly one entry per input file.
    pub async fn run<F>(&self, files: Vec<FileDescriptor>, mut on_result: F) -> Vec<UploadResult>
    where
        F: FnMut(&UploadResult),
    {
        let slots = Arc::new(Semaphore::new(self.limit));
        let mut tasks: JoinSet<UploadResult> = JoinSet::new();

        for file in files.iter().cloned() {
            let slots = slots.clone();
            let dispatcher = self.dispatcher.clone();

            tasks.spawn(async move {
                let _permit = match slots.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return UploadResult::exception(&file, "upload pool closed"),
                };
                dispatcher.dispatch(&file).await
            });
        }

        let mut results = Vec::with_capacity(files.len());
        let mut finished = HashSet::with_capacity(files.len());

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => {
                    on_result(&result);
                    finished.insert(result.index);
                    results.push(result);
                }
                Err(e) => {
                    tracing::error!(error = %e, "upload task did not complete");
                }
            }
        }

        // A task that panicked never handed back its result.
        for file in files.iter().filter(|f| !finished.contains(&f.index)) {
            let result = UploadResult::exception(file, "upload task aborted unexpectedly");
            on_result(&result);
            results.push(result);
        }

        results.sort_by_key(|r| r.index);
        results
    }
}
