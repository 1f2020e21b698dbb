use serde::{Deserialize, Serialize};

/// Tunables for the diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Maximum nesting depth compared before giving up with
    /// [`DiffError::DepthExceeded`](crate::DiffError::DepthExceeded).
    pub max_depth: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_depth() {
        assert_eq!(DiffOptions::default().max_depth, 512);
    }

    #[test]
    fn empty_toml_is_default() {
        let o: DiffOptions = toml::from_str("").unwrap();
        assert_eq!(o, DiffOptions::default());
    }
}
