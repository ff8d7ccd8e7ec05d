//! Include/exclude filename filters

use std::ffi::OsStr;

use regex::Regex;

use crate::error::{Result, UnpackError};
use crate::path_utils::is_hidden;

/// Compiled filename filter for one path entry.
///
/// Patterns are searched (not anchored) in the bare file name.
#[derive(Debug, Default)]
pub struct FileFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl FileFilter {
    pub fn compile(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    /// Whether a file with this name should be indexed.
    ///
    /// Hidden names never pass. Exclude wins over include.
    pub fn accepts(&self, file_name: &str) -> bool {
        if is_hidden(OsStr::new(file_name)) {
            return false;
        }
        if self.exclude.iter().any(|re| re.is_match(file_name)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(file_name))
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| UnpackError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}
