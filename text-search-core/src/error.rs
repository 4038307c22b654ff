//! Error types for text-search-core

use thiserror::Error;

/// Errors that can occur while encoding, scoring or ranking
#[derive(Debug, Error)]
pub enum SearchError {
    /// Embedding provider could not be initialized (e.g. weights unreachable)
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// A string could not be embedded
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Two vectors of different length were compared
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// A vector with zero magnitude was scored
    #[error("Cannot score a zero-magnitude vector")]
    ZeroMagnitude,

    /// Invalid top-K or malformed input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// Create a model unavailable error
    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    /// Create an encoding error
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
