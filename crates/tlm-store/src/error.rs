//! Error types for store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing the output hierarchy. All of them abort the run.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Output path is occupied by something that is not a previous output.
    #[error("output path {path} already exists and is not a Zarr hierarchy")]
    OutputExists { path: PathBuf },

    /// Filesystem error while preparing the output location.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Name cannot be used as a hierarchy node.
    #[error("invalid node name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// A group or dataset already exists at this path.
    #[error("node {path} already exists")]
    AlreadyExists { path: String },

    /// Matrix data was written to a group.
    #[error("node {path} is not a dataset")]
    NotADataset { path: String },

    /// Flat buffer length does not match the dataset shape.
    #[error("matrix for {path} holds {actual} values, dataset expects {expected}")]
    ShapeMismatch {
        path: String,
        expected: u64,
        actual: usize,
    },

    /// Error reported by the storage backend.
    #[error("failed to {operation} {path}: {message}")]
    Backend {
        operation: &'static str,
        path: String,
        message: String,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create a Backend error from any displayable backend error.
    pub fn backend(
        operation: &'static str,
        path: impl Into<String>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::Backend {
            operation,
            path: path.into(),
            message: err.to_string(),
        }
    }
}
