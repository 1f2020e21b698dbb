use thiserror::Error;

use crate::comparison::Side;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("{side} document: {source}")]
    Load {
        side: Side,
        #[source]
        source: specdiff_loader::LoadError,
    },

    #[error("diff failed: {0}")]
    Diff(#[from] specdiff_diff::DiffError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CompareError {
    pub(crate) fn load(side: Side) -> impl FnOnce(specdiff_loader::LoadError) -> Self {
        move |source| CompareError::Load { side, source }
    }
}

pub type CompareResult<T> = Result<T, CompareError>;
