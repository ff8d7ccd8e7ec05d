//! Path alias table (the reserved `Aliases` category)

use serde_json::Value;

use crate::error::{Result, UnpackError};

/// Ordered alias table mapping symbolic prefixes to real path prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aliases {
    entries: Vec<(String, String)>,
}

impl Aliases {
    #[cfg(test)]
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Decode the `Aliases` object, keeping declaration order.
    pub(crate) fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(UnpackError::ConfigInvalid {
                message: "'Aliases' must be an object of alias prefixes to paths".to_string(),
            });
        };

        let entries = map
            .iter()
            .map(|(alias, link)| match link {
                Value::String(link) => Ok((alias.clone(), link.clone())),
                _ => Err(UnpackError::ConfigInvalid {
                    message: format!("alias '{alias}' must map to a path string"),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }

    /// Replace the first matching alias prefix of `path`.
    ///
    /// Aliases are tried in declaration order and at most one is applied.
    pub fn resolve(&self, path: &str) -> String {
        for (alias, link) in &self.entries {
            if let Some(rest) = path.strip_prefix(alias.as_str()) {
                return format!("{link}{rest}");
            }
        }
        path.to_string()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, l)| (a.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
