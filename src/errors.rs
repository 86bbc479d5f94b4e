//! Error types for the riskview engine.
//!
//! The engine stages are total over well-formed input, so most variants
//! belong to the edges: graph expansion, option validation and file IO.

use std::path::PathBuf;

/// The main error type for riskview operations.
#[derive(Debug, thiserror::Error)]
pub enum RiskViewError {
    /// Dependency graph contains a cycle reachable from the root
    #[error("Malformed dependency tree: '{reference}' is its own ancestor (path: {})", .path.join(" -> "))]
    MalformedTree {
        reference: String,
        path: Vec<String>,
    },

    /// Dependency graph expansion exceeded the node budget
    #[error("Dependency graph from '{root}' expands past {limit} nodes")]
    TreeTooLarge { root: String, limit: usize },

    /// Pipeline option outside its accepted range
    #[error("Invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    /// I/O error (file read/write, permissions, etc.)
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Thread pool initialization error
    #[error("Failed to initialize thread pool: {0}")]
    ThreadPool(String),
}

/// Result type alias using RiskViewError
pub type RiskResult<T> = Result<T, RiskViewError>;

impl RiskViewError {
    /// Create a cycle error from the offending reference and the ancestor path leading to it
    pub fn malformed_tree(reference: impl Into<String>, path: Vec<String>) -> Self {
        Self::MalformedTree {
            reference: reference.into(),
            path,
        }
    }

    /// Create an option validation error
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Create an I/O error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convert from raw I/O errors (without path context)
impl From<std::io::Error> for RiskViewError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}
