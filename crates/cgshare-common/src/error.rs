//! Unified error types for the cgshare workspace.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum CgshareError {
    /// A filesystem operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A line did not match any known directive or record shape.
    #[error("parse error in {line:?}: {message}")]
    Parse {
        /// The offending input line.
        line: String,
        /// Description of what was wrong.
        message: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// The input or output stream itself could not be used.
    #[error("stream error: {source}")]
    Stream {
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl CgshareError {
    /// Builds a [`CgshareError::Parse`] for `line`.
    pub fn parse(line: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            line: line.to_owned(),
            message: message.into(),
        }
    }

    /// Returns `true` for per-line parse failures.
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, CgshareError>;
