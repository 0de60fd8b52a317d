use std::path::{Path, PathBuf};

use crate::error::ScanError;

/// Collects the files in `dir` whose names match `pattern`.
///
/// Only `pattern` is glob syntax; `dir` is matched literally.
pub fn enumerate(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, ScanError> {
    let full = PathBuf::from(glob::Pattern::escape(&dir.to_string_lossy())).join(pattern);
    let mut paths = Vec::new();

    for entry in glob::glob(&full.to_string_lossy())? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(path) => tracing::debug!("ignoring non-file match {}", path.display()),
            Err(e) => tracing::warn!("skipping unreadable entry: {}", e),
        }
    }

    tracing::debug!("{} matches for {}", paths.len(), full.display());
    Ok(paths)
}
