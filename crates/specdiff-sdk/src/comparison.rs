use std::fmt;

use serde::Serialize;
use specdiff_diff::{ApiOverview, DiffMetrics, DiffNode};
use specdiff_loader::ResolutionWarning;

/// Which of the two compared documents something refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Previous,
    Current,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Previous => f.write_str("previous"),
            Side::Current => f.write_str("current"),
        }
    }
}

/// A resolution warning tagged with the document it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentWarning {
    pub document: Side,
    #[serde(flatten)]
    pub warning: ResolutionWarning,
}

impl fmt::Display for DocumentWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.document, self.warning)
    }
}

/// Everything produced by one comparison.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    /// Root of the diff tree.
    pub display: DiffNode,
    pub metrics: DiffMetrics,
    pub overview: ApiOverview,
    pub warnings: Vec<DocumentWarning>,
}

impl Comparison {
    pub fn has_changes(&self) -> bool {
        self.metrics.has_changes()
    }
}
