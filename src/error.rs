use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Batch-level failures. Anything that goes wrong for a single file is an
/// `UploadOutcome`, never one of these.
#[derive(Debug, Error)]
pub enum Error {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot access {}: {source}", .path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
