use std::fmt;

use serde::Serialize;

use crate::node::{DiffKind, DiffNode};

/// Leaf counts by kind for one diff tree.
///
/// Only nodes without children are counted. The root is a leaf (and so is
/// counted) only when both inputs were scalars, empty, or of different
/// shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffMetrics {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub total: usize,
}

impl DiffMetrics {
    /// Count the leaves of `root`.
    pub fn from_tree(root: &DiffNode) -> Self {
        let mut metrics = Self::default();
        for leaf in root.leaves() {
            metrics.record(leaf.kind);
        }
        metrics
    }

    fn record(&mut self, kind: DiffKind) {
        match kind {
            DiffKind::Added => self.added += 1,
            DiffKind::Removed => self.removed += 1,
            DiffKind::Changed => self.changed += 1,
            DiffKind::Unchanged => self.unchanged += 1,
        }
        self.total += 1;
    }

    /// Whether any leaf differs between the two sides.
    pub fn has_changes(&self) -> bool {
        self.added + self.removed + self.changed > 0
    }
}

impl fmt::Display for DiffMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} added, {} removed, {} changed, {} unchanged ({} total)",
            self.added, self.removed, self.changed, self.unchanged, self.total
        )
    }
}
