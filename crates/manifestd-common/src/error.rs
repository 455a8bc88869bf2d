//! Unified error types for the manifestd workspace.
//!
//! Each higher-level crate defines its own domain-specific error enum that wraps
//! these common variants when appropriate.

use std::path::PathBuf;

use thiserror::Error;

/// A manifest failed validation.
///
/// The display string is returned verbatim to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("field '{0}' is required")]
    MissingField(&'static str),
}

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ManifestdError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A manifest was rejected by validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// YAML deserialization failed.
    #[error("YAML error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ManifestdError>;
