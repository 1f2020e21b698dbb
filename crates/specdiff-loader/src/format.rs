use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Declared syntax of a raw document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    #[serde(alias = "yml")]
    Yaml,
}

impl Format {
    /// Upper-case display name, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
        }
    }

    /// Guess the format from a file name's extension.
    ///
    /// ```
    /// use specdiff_loader::Format;
    ///
    /// assert_eq!(Format::from_path("openapi.yml"), Some(Format::Yaml));
    /// assert_eq!(Format::from_path("spec.JSON"), Some(Format::Json));
    /// assert_eq!(Format::from_path("README"), None);
    /// ```
    pub fn from_path(path: &str) -> Option<Format> {
        let (_, ext) = path.rsplit_once('.')?;
        ext.parse().ok()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "yaml" | "yml" => Ok(Format::Yaml),
            _ => Err(LoadError::UnsupportedFormat(s.to_string())),
        }
    }
}
