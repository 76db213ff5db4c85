//! Record file discovery.

use std::path::{Path, PathBuf};

use crate::error::PublishError;

/// List the regular files directly inside `dir`, sorted by path.
///
/// An unset directory yields no files.
///
/// # Errors
///
/// Returns [`PublishError::ListFiles`] if the directory cannot be read.
pub fn list_files(dir: Option<&Path>) -> Result<Vec<PathBuf>, PublishError> {
    let Some(dir) = dir else {
        return Ok(Vec::new());
    };
    let list_error = |source| PublishError::ListFiles {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
