//! Error types for the asset manager

use std::path::PathBuf;
use thiserror::Error;

/// Result type for manager operations
pub type ManagerResult<T> = std::result::Result<T, ManagerError>;

/// Errors that can occur in the asset manager
///
/// Lookups and capability resolution never fail; they return `None`. Errors
/// only come from reading or writing documents.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// Core parsing error
    #[error(transparent)]
    Core(#[from] rage_core::Error),

    /// Settings document could not be read or written
    #[error("Settings error for '{asset}': {source}")]
    Settings {
        asset: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file could not be parsed
    #[error("Invalid configuration '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ManagerError {
    /// Create a settings error
    pub fn settings(asset: impl Into<String>, source: serde_json::Error) -> Self {
        ManagerError::Settings {
            asset: asset.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManagerError::Config {
            path: path.into(),
            message: message.into(),
        }
    }
}
