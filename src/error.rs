//! Error types and handling for vdom-unpack
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for vdom-unpack operations
#[derive(Error, Diagnostic, Debug)]
pub enum UnpackError {
    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(
        code(vdom_unpack::config::read_failed),
        help("Pass the configuration location with --config_path")
    )]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(vdom_unpack::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(vdom_unpack::config::invalid),
        help(
            "Category values must be a path string, a list of paths or entries, \
             or a mapping of named entries"
        )
    )]
    ConfigInvalid { message: String },

    #[error("Invalid filename pattern '{pattern}': {reason}")]
    #[diagnostic(code(vdom_unpack::config::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },

    // Index errors
    #[error("Failed to read index file: {path}: {reason}")]
    #[diagnostic(
        code(vdom_unpack::index::read_failed),
        help("Run once without --no_index to build and save the index")
    )]
    IndexReadFailed { path: String, reason: String },

    #[error("Failed to parse index file: {path}: {reason}")]
    #[diagnostic(code(vdom_unpack::index::parse_failed))]
    IndexParseFailed { path: String, reason: String },

    #[error("Failed to write index file: {path}: {reason}")]
    #[diagnostic(code(vdom_unpack::index::write_failed))]
    IndexWriteFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to create directory: {path}: {reason}")]
    #[diagnostic(code(vdom_unpack::fs::create_dir_failed))]
    DirCreateFailed { path: String, reason: String },

    #[error("Failed to copy '{src}' to '{dst}': {reason}")]
    #[diagnostic(code(vdom_unpack::fs::copy_failed))]
    FileCopyFailed {
        src: String,
        dst: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(vdom_unpack::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for UnpackError {
    fn from(err: std::io::Error) -> Self {
        UnpackError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, UnpackError>;
