use crate::error::{Error, Result};
use crate::upload::types::FileDescriptor;
use ignore::WalkBuilder;
use std::path::Path;

/// Lists the files directly inside `dir` whose extension is in `allowed`
/// (case-insensitive) and numbers them 1..N in enumeration order.
pub fn select_files(dir: &Path, allowed: &[String]) -> Result<Vec<FileDescriptor>> {
    match dir.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(Error::DirectoryNotFound(dir.to_path_buf())),
        Err(source) => {
            return Err(Error::Inaccessible {
                path: dir.to_path_buf(),
                source,
            })
        }
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .standard_filters(false)
        .follow_links(true)
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.depth() == 0 || !entry.file_type().map_or(false, |t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        if !is_supported_file(path, allowed) {
            tracing::debug!(file = %path.display(), "extension not allowed, skipping");
            continue;
        }

        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        files.push(FileDescriptor {
            path: path.to_path_buf(),
            name,
            index: files.len() + 1,
        });
    }

    Ok(files)
}

fn is_supported_file(path: &Path, allowed: &[String]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)),
        None => false,
    }
}
