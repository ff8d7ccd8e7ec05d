//! Category value shapes
//!
//! A category maps to a single path, a list of entries or a mapping of named
//! entries. The shape is decoded once at load time; anything else is rejected.

use serde_json::{Map, Value};

use crate::error::{Result, UnpackError};

/// One source location with optional filename filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathEntry {
    pub path: String,
    /// Regex patterns a filename must match (any of) to be indexed
    pub include: Vec<String>,
    /// Regex patterns that exclude a filename; checked before `include`
    pub exclude: Vec<String>,
}

impl PathEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    fn from_value(category: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(Self::new(path.clone())),
            Value::Object(map) => Self::from_object(category, map),
            other => Err(invalid(
                category,
                &format!("entry must be a path string or an object, got {}", kind(other)),
            )),
        }
    }

    fn from_object(category: &str, map: &Map<String, Value>) -> Result<Self> {
        let Some(Value::String(path)) = map.get("path") else {
            return Err(invalid(category, "entry object requires a string 'path'"));
        };

        Ok(Self {
            path: path.clone(),
            include: patterns(category, map.get("include"))?,
            exclude: patterns(category, map.get("exclude"))?,
        })
    }
}

/// Shape of a category's settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSpec {
    /// A bare path, or an entry object given directly as the category value
    Single(PathEntry),
    List(Vec<PathEntry>),
    Named(Vec<(String, PathEntry)>),
}

impl PathSpec {
    pub(crate) fn from_value(category: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(path) => Ok(PathSpec::Single(PathEntry::new(path.clone()))),
            Value::Array(items) => items
                .iter()
                .map(|item| PathEntry::from_value(category, item))
                .collect::<Result<Vec<_>>>()
                .map(PathSpec::List),
            Value::Object(map) if is_entry_object(map) => {
                PathEntry::from_object(category, map).map(PathSpec::Single)
            }
            Value::Object(map) if has_filters(map) => Err(invalid(
                category,
                &format!(
                    "entry object allows only {}, found '{}'",
                    ENTRY_KEYS.join(", "),
                    map.keys()
                        .filter(|k| !ENTRY_KEYS.contains(&k.as_str()))
                        .cloned()
                        .collect::<Vec<_>>()
                        .join("', '")
                ),
            )),
            Value::Object(map) => map
                .iter()
                .map(|(name, item)| {
                    PathEntry::from_value(category, item).map(|entry| (name.clone(), entry))
                })
                .collect::<Result<Vec<_>>>()
                .map(PathSpec::Named),
            other => Err(invalid(
                category,
                &format!(
                    "expected a path string, a list or a mapping, got {}",
                    kind(other)
                ),
            )),
        }
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> Vec<&PathEntry> {
        match self {
            PathSpec::Single(entry) => vec![entry],
            PathSpec::List(entries) => entries.iter().collect(),
            PathSpec::Named(entries) => entries.iter().map(|(_, entry)| entry).collect(),
        }
    }
}

/// Keys of an entry object
const ENTRY_KEYS: &[&str] = &["path", "include", "exclude"];

/// An object with a string `path` and nothing but entry keys
fn is_entry_object(map: &Map<String, Value>) -> bool {
    matches!(map.get("path"), Some(Value::String(_)))
        && map.keys().all(|k| ENTRY_KEYS.contains(&k.as_str()))
}

/// Filter keys only make sense on an entry object, never next to named entries
fn has_filters(map: &Map<String, Value>) -> bool {
    map.contains_key("include") || map.contains_key("exclude")
}

/// `include` / `exclude` accept one pattern or a list of them.
fn patterns(category: &str, value: Option<&Value>) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(pattern)) => Ok(vec![pattern.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(pattern) => Ok(pattern.clone()),
                other => Err(invalid(
                    category,
                    &format!("filename patterns must be strings, got {}", kind(other)),
                )),
            })
            .collect(),
        Some(other) => Err(invalid(
            category,
            &format!(
                "filename patterns must be a string or a list, got {}",
                kind(other)
            ),
        )),
    }
}

fn invalid(category: &str, reason: &str) -> UnpackError {
    UnpackError::ConfigInvalid {
        message: format!("category '{category}': {reason}"),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
