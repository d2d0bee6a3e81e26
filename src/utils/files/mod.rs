use crate::core::error::PatchError;
use std::fs;
use std::path::{Path, PathBuf};

/// List the workflow files directly inside `dir` whose extension is
/// `extension` (with or without a leading dot).
///
/// The directory listing order is platform dependent, so the result is
/// sorted to keep runs reproducible.
pub fn discover_workflows(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, PatchError> {
    let extension = extension.trim_start_matches('.');
    let scan_error = |source: std::io::Error| PatchError::ScanDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        let path = entry.map_err(scan_error)?.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == extension);
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    tracing::debug!(dir = %dir.display(), count = paths.len(), "discovered workflow files");
    Ok(paths)
}

pub fn read_workflow(path: &Path) -> Result<String, PatchError> {
    fs::read_to_string(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite a workflow file in place. No backup is kept.
pub fn write_workflow(path: &Path, content: &str) -> Result<(), PatchError> {
    fs::write(path, content).map_err(|source| PatchError::Write {
        path: path.to_path_buf(),
        source,
    })
}
