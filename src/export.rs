//! Plain-text export of generated output.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export yet")]
    Empty,
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// `storage_YYYYMMDD_HHMMSS.txt`
pub fn export_filename(at: DateTime<Local>) -> String {
    format!("storage_{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Write `text` into `dir` under a timestamped name and return the path.
pub fn write_export(dir: &Path, text: &str, at: DateTime<Local>) -> Result<PathBuf, ExportError> {
    if text.trim().is_empty() {
        return Err(ExportError::Empty);
    }
    let path = dir.join(export_filename(at));
    std::fs::write(&path, text).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), bytes = text.len(), "exported output");
    Ok(path)
}
