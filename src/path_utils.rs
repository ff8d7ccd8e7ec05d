//! Path helpers shared by the indexer and the unpacker
//!
//! Index keys always use forward slashes so an index written on one platform
//! can be reused on another.

use std::path::{Component, Path, PathBuf};

/// Convert a path to a string with forward slashes.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Whether a file or directory name is hidden (starts with a dot).
pub fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Whether a walked entry is a file, or a symlink resolving to one.
///
/// Walks do not follow symlinked directories, but linked files still count.
pub fn is_file_entry(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Drop the leading segment of a relative path when more than one remains.
///
/// The first segment is the scanned root's own name (or the bundle's
/// top-level container) and does not take part in the key.
pub fn strip_first_segment(relative: &Path) -> PathBuf {
    let mut components = relative.components();
    if relative.components().count() > 1 {
        components.next();
    }
    components.as_path().to_path_buf()
}

/// Replace a leading `.` component with `parent_dir`.
///
/// Source trees referenced through a `.` alias belong to the repository the
/// tool runs from; their destinations land under a directory of that name.
pub fn substitute_current_dir(path: &Path, parent_dir: &str) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::CurDir) => Path::new(parent_dir).join(components.as_path()),
        _ => path.to_path_buf(),
    }
}

/// Make `path` absolute against the current directory without touching the filesystem.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
