use serde::{Deserialize, Serialize};

/// Resource bounds for reference resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Maximum combined nesting depth (tree levels plus expanded
    /// references). Deeper references are left unresolved.
    pub max_depth: usize,
    /// Maximum number of reference expansions in one resolution call.
    pub max_expansions: usize,
    /// Maximum number of nodes all expansions together may copy into the
    /// output. Each expansion is charged the node count of its target.
    pub max_output_nodes: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_expansions: 100_000,
            max_output_nodes: 1_000_000,
        }
    }
}
