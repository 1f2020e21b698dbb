use serde::{Deserialize, Serialize};
use specdiff_diff::DiffOptions;
use specdiff_loader::ResolveOptions;

use crate::error::{CompareError, CompareResult};

/// Settings for one comparison.
///
/// Loadable from TOML; every field is optional:
///
/// ```toml
/// resolve_refs = true
///
/// [resolve]
/// max_depth = 64
///
/// [diff]
/// max_depth = 256
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Expand internal `$ref` pointers before diffing (default off).
    pub resolve_refs: bool,
    pub resolve: ResolveOptions,
    pub diff: DiffOptions,
}

impl CompareConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> CompareResult<Self> {
        toml::from_str(s).map_err(|e| CompareError::Config(e.to_string()))
    }

    pub fn with_resolve_refs(mut self, enabled: bool) -> Self {
        self.resolve_refs = enabled;
        self
    }
}
