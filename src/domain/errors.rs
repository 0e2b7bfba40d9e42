// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration store.
//!
//! Reads and writes against the store never fail; absence is reported as `None`.
//! The errors here come from the file helpers, the document parser and the typed
//! accessors that convert a stored node into a Rust type.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// Marked `#[non_exhaustive]` so variants can be added without a breaking change.
///
/// # Examples
///
/// ```
/// use treecfg::domain::errors::ConfigError;
///
/// fn copy_config() -> Result<bool, ConfigError> {
///     Err(ConfigError::ConfigNotFound {
///         path: "/etc/app/config.yaml".into(),
///     })
/// }
///
/// assert!(copy_config().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration file that was expected on disk does not exist.
    #[error("Config file {} not found", path.display())]
    ConfigNotFound {
        /// The missing file
        path: PathBuf,
    },

    /// A stored node has a different shape than the one requested.
    #[error("Configuration value at '{path}' is {found}, expected {expected}")]
    TypeMismatch {
        /// The path that was read
        path: String,
        /// The expected kind of value
        expected: &'static str,
        /// The kind of value actually stored
        found: &'static str,
    },

    /// Failed to convert a scalar to the requested type.
    #[error(
        "Failed to convert configuration value at '{path}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The path being converted
        path: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The OS configuration directory could not be determined.
    #[error("Unable to determine configuration directory for '{app_name}'")]
    DirectoryUnavailable {
        /// The application the directory was requested for
        app_name: String,
    },

    /// A configuration document could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while copying configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
