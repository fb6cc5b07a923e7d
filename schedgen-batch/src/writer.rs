//! Atomic output writer.
//!
//! Writes go to `<path>.schedgen.tmp` first and are renamed into place
//! (atomic on POSIX), so a crash mid-write never leaves a truncated
//! document behind. Duplicate `(number, initial)` rows rename over the
//! earlier file: deterministic last-write-wins.

use std::path::{Path, PathBuf};

use crate::error::{io_err, BatchError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written { path: PathBuf },
    /// Dry-run mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

/// Atomically write one output document.
pub fn atomic_write(
    path: &Path,
    content: &[u8],
    dry_run: bool,
) -> Result<WriteResult, BatchError> {
    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.schedgen.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}
