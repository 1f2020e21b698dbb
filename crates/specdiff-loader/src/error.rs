//! Error types for the loader crate.

use std::fmt;

use crate::format::Format;

/// Errors that can occur while loading a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The content is not valid for its declared format, or holds values a
    /// document tree cannot represent.
    #[error("failed to parse {format} document: {message}")]
    Parse { format: Format, message: String },

    /// The declared format is not one of the supported ones.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

impl LoadError {
    pub(crate) fn parse(format: Format, err: impl fmt::Display) -> Self {
        LoadError::Parse {
            format,
            message: err.to_string(),
        }
    }
}

/// Convenience alias for loader results.
pub type LoadResult<T> = Result<T, LoadError>;
