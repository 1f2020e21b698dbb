//! Error types for the diff crate.

/// Errors that can occur during diff operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// An input could not be represented as a document tree.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The inputs nest deeper than the configured limit.
    #[error("nesting deeper than {limit} levels at {path:?}")]
    DepthExceeded { path: String, limit: usize },
}

impl From<specdiff_types::TypeError> for DiffError {
    fn from(err: specdiff_types::TypeError) -> Self {
        DiffError::InvalidInput(err.to_string())
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
