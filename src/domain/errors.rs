// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur while loading configuration
//! fragments and converting configuration values. All errors use `thiserror` for
//! proper error handling and conversion.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Only loading (`populate`) and typed access (`get_as`) can fail. Plain key path
/// reads and writes never return an error; they degrade to an absent value or an
/// ignored write instead. The enum is marked as `#[non_exhaustive]` to allow for
/// future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use layercfg::domain::errors::ConfigError;
///
/// fn load_fragment() -> Result<(), ConfigError> {
///     Err(ConfigError::ParseError {
///         message: "expected value at line 1 column 1".to_string(),
///         source: None,
///     })
/// }
///
/// assert!(load_fragment().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A directory or file could not be read while loading configuration.
    #[error("I/O error at '{}': {source}", .path.display())]
    IoError {
        /// The path that could not be read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A configuration fragment could not be deserialized.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key path being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error occurred in a configuration adapter.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the adapter that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ConfigError {
    /// Creates an `IoError` for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::IoError {
            path: path.into(),
            source,
        }
    }

    /// Creates a `TypeConversionError` from a `serde_json` deserialization failure.
    pub fn from_serde_json_error<T>(key: impl Into<String>, err: serde_json::Error) -> Self {
        ConfigError::TypeConversionError {
            key: key.into(),
            target_type: std::any::type_name::<T>().to_string(),
            source: Box::new(err),
        }
    }

    /// Returns `true` if this error was caused by a failed read.
    pub fn is_io(&self) -> bool {
        matches!(self, ConfigError::IoError { .. })
    }

    /// Returns `true` if this error was caused by malformed configuration content.
    pub fn is_parse(&self) -> bool {
        matches!(self, ConfigError::ParseError { .. })
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
