//! Index construction from configured source trees
//!
//! Every configured path is alias-resolved and walked. Each accepted file is
//! keyed by its path relative to the parent of the scanned root, with the
//! first segment (the root's own name) dropped when anything remains after it.
//! So `/repo/core/src/lib/a.js` scanned from `/repo/core/src` under category
//! `App` becomes `App/lib/a.js`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{APPLICATION_INFO_CATEGORY, Config, DATABASES_CATEGORY, PathEntry};
use crate::error::Result;
use crate::index::{FileFilter, Index};
use crate::path_utils::{
    absolute, is_file_entry, is_hidden, strip_first_segment, substitute_current_dir,
    to_forward_slashes,
};

/// Options that change what gets indexed
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Skip the `Databases` category
    pub skip_db: bool,
    /// Directory name substituted for a leading `.` in destinations
    pub parent_dir: String,
}

/// Builds an [`Index`] from a [`Config`]
pub struct Indexer<'a> {
    config: &'a Config,
    options: IndexOptions,
    index: Index,
}

impl<'a> Indexer<'a> {
    pub fn new(config: &'a Config, options: IndexOptions) -> Self {
        Self {
            config,
            options,
            index: Index::new(),
        }
    }

    /// Walk all categories and return the completed index.
    ///
    /// Categories are processed in declaration order; when two files produce
    /// the same key the one processed last wins.
    pub fn build(mut self) -> Result<Index> {
        let config = self.config;
        for (category, spec) in config.categories() {
            if self.options.skip_db && category == DATABASES_CATEGORY {
                tracing::debug!("Skipping category {category}");
                continue;
            }

            for entry in spec.entries() {
                self.index_entry(category, entry)?;
            }
        }

        tracing::debug!(entries = self.index.len(), "Index built");
        Ok(self.index)
    }

    fn index_entry(&mut self, category: &str, entry: &PathEntry) -> Result<()> {
        let resolved = self.config.resolve(&entry.path);
        let filter = FileFilter::compile(&entry.include, &entry.exclude)?;
        let root = PathBuf::from(&resolved);

        tracing::debug!(category, path = %resolved, "Indexing path");

        if root.is_file() {
            let accepted = root
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| filter.accepts(name));
            if accepted {
                self.index_file(category, &root, &root)?;
            }
            return Ok(());
        }

        if !root.is_dir() {
            tracing::warn!(category, "Configured path does not exist: {resolved}");
            return Ok(());
        }

        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for item in walker {
            let item = match item {
                Ok(item) => item,
                Err(err) => {
                    tracing::warn!(category, "Skipping unreadable entry: {err}");
                    continue;
                }
            };

            if !is_file_entry(&item) {
                continue;
            }

            let Some(name) = item.file_name().to_str() else {
                tracing::warn!("Skipping non UTF-8 file name: {}", item.path().display());
                continue;
            };

            if filter.accepts(name) {
                self.index_file(category, &root, item.path())?;
            }
        }

        Ok(())
    }

    fn index_file(&mut self, category: &str, root: &Path, file: &Path) -> Result<()> {
        let root_abs = absolute(root)?;
        let base = root_abs.parent().unwrap_or(&root_abs);
        let file_abs = absolute(file)?;

        let relative = file_abs
            .strip_prefix(base)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(file.file_name().unwrap_or_default()));
        let key = to_forward_slashes(&strip_first_segment(&relative));

        let dir = file.parent().unwrap_or_else(|| Path::new(""));
        let dir = substitute_current_dir(dir, &self.options.parent_dir);

        tracing::trace!(category, key = %key, dir = %dir.display(), "Indexed file");

        if category == APPLICATION_INFO_CATEGORY {
            self.index.insert(key.clone(), dir.clone());
        }
        self.index.insert(format!("{category}/{key}"), dir);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    fn options(skip_db: bool) -> IndexOptions {
        IndexOptions {
            skip_db,
            parent_dir: "my-app".to_string(),
        }
    }

    fn build(json: &str, skip_db: bool) -> Index {
        let config = Config::from_json_str(json).unwrap();
        Indexer::new(&config, options(skip_db)).build().unwrap()
    }

    /// Temp path with forward slashes, for embedding in a config string
    fn json_path(path: &Path) -> String {
        to_forward_slashes(path)
    }

    #[test]
    fn test_alias_and_include_filter() {
        let temp = TempDir::new().unwrap();
        let core = temp.path().join("repo/core");
        write(&core, "src/a.js");
        write(&core, "src/a.txt");

        let json = format!(
            r#"{{"Aliases": {{"@core": "{}"}}, "App": {{"path": "@core/src", "include": ["\\.js$"]}}}}"#,
            json_path(&core)
        );
        let index = build(&json, true);

        assert_eq!(index.get("App/a.js"), Some(core.join("src").as_path()));
        assert!(index.iter().all(|(key, _)| !key.ends_with(".txt")));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_nested_files_keep_subdirectories() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src, "lib/util/b.js");

        let json = format!(r#"{{"App": "{}"}}"#, json_path(&src));
        let index = build(&json, true);

        assert_eq!(
            index.get("App/lib/util/b.js"),
            Some(src.join("lib/util").as_path())
        );
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src, "app.js");
        write(&src, "app.min.js");

        let json = format!(
            r#"{{"App": [{{"path": "{}", "include": "\\.js$", "exclude": ["\\.min\\.js$"]}}]}}"#,
            json_path(&src)
        );
        let index = build(&json, true);

        assert!(index.get("App/app.js").is_some());
        assert!(index.get("App/app.min.js").is_none());
    }

    #[test]
    fn test_hidden_files_and_directories_skipped() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src, "a.js");
        write(&src, ".eslintrc");
        write(&src, ".git/config");
        write(&src, "sub/.hidden.js");

        let json = format!(r#"{{"App": "{}"}}"#, json_path(&src));
        let index = build(&json, true);

        let keys: Vec<_> = index.iter().map(|(key, _)| key.to_string()).collect();
        assert_eq!(keys, vec!["App/a.js".to_string()]);
    }

    #[test]
    fn test_application_info_indexed_without_prefix() {
        let temp = TempDir::new().unwrap();
        let info = temp.path().join("info");
        write(&info, "manifest.xml");

        let json = format!(r#"{{"ApplicationInfo": "{}"}}"#, json_path(&info));
        let index = build(&json, true);

        assert_eq!(index.get("manifest.xml"), Some(info.as_path()));
        assert_eq!(index.get("ApplicationInfo/manifest.xml"), Some(info.as_path()));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_other_categories_require_prefix() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src, "a.js");

        let json = format!(r#"{{"App": "{}"}}"#, json_path(&src));
        let index = build(&json, true);

        assert!(index.get("a.js").is_none());
        assert!(index.get("App/a.js").is_some());
    }

    #[test]
    fn test_databases_skipped_only_when_requested() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("db");
        write(&db, "schema.xml");

        let json = format!(r#"{{"Databases": ["{}"]}}"#, json_path(&db));

        assert!(build(&json, true).is_empty());
        assert!(build(&json, false).get("Databases/schema.xml").is_some());
    }

    #[test]
    fn test_named_entries() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "pages/home.html");
        write(temp.path(), "styles/main.css");

        let json = format!(
            r#"{{"Resources": {{"pages": "{}", "styles": {{"path": "{}"}}}}}}"#,
            json_path(&temp.path().join("pages")),
            json_path(&temp.path().join("styles"))
        );
        let index = build(&json, true);

        assert!(index.get("Resources/home.html").is_some());
        assert!(index.get("Resources/main.css").is_some());
    }

    #[test]
    fn test_single_file_path() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "conf/app.json");
        let file = temp.path().join("conf/app.json");

        let json = format!(r#"{{"App": "{}"}}"#, json_path(&file));
        let index = build(&json, true);

        assert_eq!(
            index.get("App/app.json"),
            Some(temp.path().join("conf").as_path())
        );
    }

    #[test]
    fn test_last_processed_category_wins() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "one/src/a.js");
        write(temp.path(), "two/src/a.js");

        let json = format!(
            r#"{{"App": ["{}", "{}"]}}"#,
            json_path(&temp.path().join("one/src")),
            json_path(&temp.path().join("two/src"))
        );
        let index = build(&json, true);

        assert_eq!(
            index.get("App/a.js"),
            Some(temp.path().join("two/src").as_path())
        );
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let temp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"App": "{}"}}"#,
            json_path(&temp.path().join("does-not-exist"))
        );
        assert!(build(&json, true).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories_not_followed() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src, "a.js");
        write(temp.path(), "elsewhere/lib/b.js");
        write(temp.path(), "elsewhere/c.js");
        std::os::unix::fs::symlink(temp.path().join("elsewhere/lib"), src.join("lib")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("elsewhere/c.js"), src.join("c.js"))
            .unwrap();

        let json = format!(r#"{{"App": "{}"}}"#, json_path(&src));
        let index = build(&json, true);

        assert!(index.get("App/a.js").is_some());
        assert!(index.get("App/c.js").is_some());
        assert!(index.get("App/lib/b.js").is_none());
    }

    #[test]
    fn test_invalid_pattern_fails_build() {
        let temp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"App": {{"path": "{}", "include": "(["}}}}"#,
            json_path(temp.path())
        );
        let config = Config::from_json_str(&json).unwrap();
        assert!(Indexer::new(&config, options(true)).build().is_err());
    }
}
