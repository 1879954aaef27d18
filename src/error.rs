//! Error types for patient-matcher.
//!
//! The matching core itself is total: normalization, similarity, scoring,
//! and candidate lookup have defined results for every input, so nothing in
//! a run can fail given valid configuration. The error surface covers
//! configuration loading and validation only.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for patient-matcher operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MatcherError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO errors with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// Configuration JSON could not be parsed
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatcherError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }
}

impl From<std::io::Error> for MatcherError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            source: err,
        }
    }
}

/// Convenient Result type for patient-matcher operations
pub type Result<T> = std::result::Result<T, MatcherError>;
