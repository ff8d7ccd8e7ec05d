//! Copy pass: reconcile an unpacked bundle against the index
//!
//! Every visible file under the unpack directory is looked up by its path
//! relative to the unpack root. Mapped files are copied into
//! `output_root.join(index[path])`; unmapped ones land in
//! `output_root/new_files` for manual triage. Bundle files are only read.

use std::path::{Path, PathBuf};

use console::Style;
use walkdir::WalkDir;

use crate::config::{Aliases, DATABASES_CATEGORY};
use crate::error::Result;
use crate::index::Index;
use crate::path_utils::{absolute, is_file_entry, is_hidden, to_forward_slashes};
use crate::progress::CopyProgress;

pub mod file_ops;

use file_ops::{DirStatus, copy_into, ensure_dir};

/// Directory under the output root collecting files without an index entry
pub const NEW_FILES_DIR: &str = "new_files";

#[derive(Debug, Clone)]
pub struct UnpackOptions {
    /// Root that index destinations and scaffolding are resolved against
    pub output_root: PathBuf,
    /// Directory name used for aliases that map to `.`
    pub parent_dir: String,
    /// Prune `Databases` directories from the walk
    pub skip_db: bool,
}

/// Counts from one copy pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnpackReport {
    /// Files copied to an indexed destination
    pub mapped: usize,
    /// Files copied into `new_files`
    pub unmapped: usize,
}

pub struct Unpacker<'a> {
    index: &'a Index,
    options: UnpackOptions,
}

impl<'a> Unpacker<'a> {
    pub fn new(index: &'a Index, options: UnpackOptions) -> Self {
        Self { index, options }
    }

    pub fn new_files_dir(&self) -> PathBuf {
        self.options.output_root.join(NEW_FILES_DIR)
    }

    /// Create the output root, one directory per alias target and `new_files`.
    pub fn prepare(&self, aliases: &Aliases) -> Result<()> {
        report_dir(&self.options.output_root, ensure_dir(&self.options.output_root)?);

        for (alias, target) in aliases.iter() {
            let dir = if target == "." {
                self.options.output_root.join(&self.options.parent_dir)
            } else {
                self.options.output_root.join(target)
            };
            tracing::debug!(alias, "Preparing repository directory {}", dir.display());
            report_dir(&dir, ensure_dir(&dir)?);
        }

        let new_files = self.new_files_dir();
        report_dir(&new_files, ensure_dir(&new_files)?);

        Ok(())
    }

    /// Copy every bundle file under `unpack_dir` to its destination.
    pub fn run(&self, unpack_dir: &Path) -> Result<UnpackReport> {
        let unpack_root = absolute(unpack_dir)?;
        if !unpack_root.is_dir() {
            tracing::warn!("Unpack directory does not exist: {}", unpack_root.display());
            return Ok(UnpackReport::default());
        }

        let files = self.collect_files(&unpack_root);
        let progress = CopyProgress::new(files.len() as u64);
        let mut report = UnpackReport::default();

        for file in &files {
            if let Err(e) = self.copy_file(&unpack_root, file, &mut report, &progress) {
                progress.abandon();
                return Err(e);
            }
        }

        progress.finish();
        Ok(report)
    }

    fn collect_files(&self, unpack_root: &Path) -> Vec<PathBuf> {
        let skip_db = self.options.skip_db;

        WalkDir::new(unpack_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| {
                if e.depth() == 0 {
                    return true;
                }
                if is_hidden(e.file_name()) {
                    return false;
                }
                !(skip_db && e.file_type().is_dir() && e.file_name() == DATABASES_CATEGORY)
            })
            .filter_map(|item| match item {
                Ok(item) => Some(item),
                Err(err) => {
                    tracing::warn!("Skipping unreadable entry: {err}");
                    None
                }
            })
            .filter(is_file_entry)
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    fn copy_file(
        &self,
        unpack_root: &Path,
        file: &Path,
        report: &mut UnpackReport,
        progress: &CopyProgress,
    ) -> Result<()> {
        let relative = file.strip_prefix(unpack_root).unwrap_or(file);
        let key = to_forward_slashes(relative);
        progress.update_file(&key);

        match self.index.get(&key) {
            Some(dir) => {
                let dest = self.options.output_root.join(dir);
                ensure_dir(&dest)?;
                let target = copy_into(file, &dest)?;
                tracing::debug!(key = %key, "Copied to {}", target.display());
                report.mapped += 1;
            }
            None => {
                let target = copy_into(file, &self.new_files_dir())?;
                tracing::info!(key = %key, "No index entry, copied to {}", target.display());
                report.unmapped += 1;
            }
        }

        Ok(())
    }
}

fn report_dir(path: &Path, status: DirStatus) {
    match status {
        DirStatus::Created => {
            let green = Style::new().green();
            println!("{} {}", green.apply_to("Directory created:"), path.display());
        }
        DirStatus::Existed => {
            let dim = Style::new().dim();
            println!("{} {}", dim.apply_to("Directory already exists:"), path.display());
        }
    }
}
