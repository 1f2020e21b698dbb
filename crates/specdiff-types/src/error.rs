use thiserror::Error;

/// Errors produced when a value cannot be represented as a [`TreeValue`].
///
/// [`TreeValue`]: crate::TreeValue
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("non-finite number is not representable: {0}")]
    NonFiniteNumber(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for type conversion results.
pub type TypeResult<T> = Result<T, TypeError>;
