use serde::Serialize;

/// A reference that was left unresolved, or only partly applied.
///
/// Warnings never abort resolution; the affected `$ref` node stays in the
/// output as it was written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionWarning {
    /// Points outside the document (another file, a URL, or bare `#`).
    #[error("external reference left unresolved: {reference}")]
    External { reference: String },

    /// Well formed, but nothing exists at the target.
    #[error("dangling reference {reference}: {reason}")]
    Dangling { reference: String, reason: String },

    /// The pointer text is invalid.
    #[error("malformed reference {reference}: {reason}")]
    Malformed { reference: String, reason: String },

    /// The target is not a mapping, so keys next to `$ref` had nowhere to go.
    #[error("keys beside {reference} dropped: target is a {target}")]
    SiblingsDiscarded { reference: String, target: String },

    /// A resolution bound was hit; the reference was left in place.
    #[error("reference {reference} left unresolved: {limit} limit of {value} reached")]
    LimitReached {
        reference: String,
        limit: String,
        value: usize,
    },

    /// Plain nesting went past the depth bound; the subtree was copied
    /// without looking for references.
    #[error("subtree nested deeper than {limit} levels left unresolved")]
    NestingTooDeep { limit: usize },
}

impl ResolutionWarning {
    /// The reference string this warning is about, if it concerns one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            ResolutionWarning::External { reference }
            | ResolutionWarning::Dangling { reference, .. }
            | ResolutionWarning::Malformed { reference, .. }
            | ResolutionWarning::SiblingsDiscarded { reference, .. }
            | ResolutionWarning::LimitReached { reference, .. } => Some(reference),
            ResolutionWarning::NestingTooDeep { .. } => None,
        }
    }
}
