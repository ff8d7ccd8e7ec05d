//! Configuration file (`vdom2fs.conf`) loading
//!
//! The file is a JSON object whose keys are category names. The reserved
//! `Aliases` key holds the alias table. Key order is preserved, so categories
//! are indexed in the order they are declared.

use std::path::Path;

use serde_json::Value;

use crate::error::{Result, UnpackError};

pub mod aliases;
pub mod path_spec;

pub use aliases::Aliases;
pub use path_spec::{PathEntry, PathSpec};

/// Name of the reserved alias category
pub const ALIASES_KEY: &str = "Aliases";
/// Category skipped when `--skip_db` is set
pub const DATABASES_CATEGORY: &str = "Databases";
/// Category whose files are also indexed without the category prefix
pub const APPLICATION_INFO_CATEGORY: &str = "ApplicationInfo";

/// Parsed configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    aliases: Aliases,
    categories: Vec<(String, PathSpec)>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| UnpackError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::parse(&content, &path.display().to_string())
    }

    /// Parse configuration from a JSON string
    #[cfg(test)]
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::parse(json, "<string>")
    }

    fn parse(json: &str, origin: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| UnpackError::ConfigParseFailed {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;

        let Value::Object(root) = value else {
            return Err(UnpackError::ConfigInvalid {
                message: "top-level value must be an object of categories".to_string(),
            });
        };

        let mut config = Config::default();
        for (name, settings) in &root {
            if name == ALIASES_KEY {
                config.aliases = Aliases::from_value(settings)?;
            } else {
                config
                    .categories
                    .push((name.clone(), PathSpec::from_value(name, settings)?));
            }
        }

        tracing::debug!(
            categories = config.categories.len(),
            aliases = config.aliases.len(),
            "Loaded configuration from {origin}"
        );

        Ok(config)
    }

    pub fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    /// Categories in declaration order, excluding `Aliases`
    pub fn categories(&self) -> impl Iterator<Item = (&str, &PathSpec)> {
        self.categories.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Resolve alias prefixes in `path`
    pub fn resolve(&self, path: &str) -> String {
        self.aliases.resolve(path)
    }
}
