use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CleanupOutcome {
    /// The directory was not there; nothing to do.
    Missing,
    Cleaned {
        removed: usize,
        failures: Vec<(PathBuf, io::Error)>,
    },
}

/// Empties `dir` without removing it. A failure on one entry is recorded and
/// the rest are still attempted.
pub fn clean_dir(dir: &Path) -> io::Result<CleanupOutcome> {
    if !dir.try_exists()? {
        return Ok(CleanupOutcome::Missing);
    }

    let mut removed = 0;
    let mut failures = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                failures.push((dir.to_path_buf(), e));
                continue;
            }
        };

        match remove_entry(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed");
                removed += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to delete");
                failures.push((path, e));
            }
        }
    }

    Ok(CleanupOutcome::Cleaned { removed, failures })
}

fn remove_entry(path: &Path) -> io::Result<()> {
    // symlink_metadata so a link to a directory is unlinked, not followed
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
