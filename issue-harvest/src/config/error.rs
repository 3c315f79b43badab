//! Configuration error types.

use crate::source::InvalidRepoRef;
use thiserror::Error;

/// Errors that can occur while loading or resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config in '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A value is out of range or inconsistent with another one.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// A repository was not given as `owner/name`.
    #[error(transparent)]
    InvalidRepo(#[from] InvalidRepoRef),
}
