//! Basic file operations for the copy pass
//!
//! - Directory creation that tolerates a directory appearing concurrently
//! - Copying a file into a directory, keeping its name

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, UnpackError};

/// Outcome of [`ensure_dir`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    Existed,
}

/// Create `path` and any missing parents.
///
/// An already existing directory is not an error; any other failure is.
pub fn ensure_dir(path: &Path) -> Result<DirStatus> {
    if path.is_dir() {
        return Ok(DirStatus::Existed);
    }

    match std::fs::create_dir_all(path) {
        Ok(()) => Ok(DirStatus::Created),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(DirStatus::Existed),
        Err(e) => Err(UnpackError::DirCreateFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Copy `source` into directory `dir`, overwriting a file of the same name.
pub fn copy_into(source: &Path, dir: &Path) -> Result<PathBuf> {
    let target = match source.file_name() {
        Some(name) => dir.join(name),
        None => dir.to_path_buf(),
    };

    std::fs::copy(source, &target).map_err(|e| UnpackError::FileCopyFailed {
        src: source.display().to_string(),
        dst: target.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(target)
}
