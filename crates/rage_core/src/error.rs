//! Error types for the core library

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// The core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Version string error
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Dependency range error
    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    /// Version descriptor could not be read or written
    #[error("Descriptor error: {0}")]
    Descriptor(#[from] serde_json::Error),
}

/// Version parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// Not of the form `major.minor[.build[.revision]]`
    #[error("Malformed version '{0}'")]
    Malformed(String),
}

/// Dependency range errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// A range has one or two `-` separated bounds
    #[error("Range '{range}' has {tokens} bounds, expected 1 or 2")]
    TokenCount { range: String, tokens: usize },
}
