//! Reverse index from bundle-relative file paths to destination directories
//!
//! Keys are category-qualified relative paths (`App/a.js`), plus bare relative
//! paths for files of the `ApplicationInfo` category. Values are the
//! directories the files were found in. The index is saved as a flat JSON
//! object so a later run can skip indexing with `--no_index`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, UnpackError};

pub mod builder;
pub mod filter;

pub use builder::{IndexOptions, Indexer};
pub use filter::FileFilter;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Index {
    entries: BTreeMap<String, PathBuf>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mapping; an existing key is overwritten.
    pub fn insert(&mut self, key: impl Into<String>, dir: impl Into<PathBuf>) {
        self.entries.insert(key.into(), dir.into());
    }

    pub fn get(&self, key: &str) -> Option<&Path> {
        self.entries.get(key).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_path()))
    }

    /// Load a previously saved index
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| UnpackError::IndexReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let index: Index =
            serde_json::from_str(&content).map_err(|e| UnpackError::IndexParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(entries = index.len(), "Loaded index from {}", path.display());
        Ok(index)
    }

    /// Save the index as pretty-printed JSON (4-space indent)
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_failed = |reason: String| UnpackError::IndexWriteFailed {
            path: path.display().to_string(),
            reason,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| write_failed(e.to_string()))?;

        std::fs::write(path, buf).map_err(|e| write_failed(e.to_string()))?;

        tracing::debug!(entries = self.len(), "Saved index to {}", path.display());
        Ok(())
    }
}
