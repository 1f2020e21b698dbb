//! Raw text → [`TreeValue`].

use specdiff_types::TreeValue;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::format::Format;

/// Parse `content` according to its declared `format`.
///
/// Errors carry the underlying parser's message and the declared format.
///
/// ```
/// use specdiff_loader::{parse, Format};
///
/// let tree = parse("a: 1", Format::Yaml).unwrap();
/// assert_eq!(tree.get("a").map(|v| v.to_string()), Some("1".to_string()));
/// assert!(parse("{", Format::Json).is_err());
/// ```
pub fn parse(content: &str, format: Format) -> LoadResult<TreeValue> {
    let tree = match format {
        Format::Json => parse_json(content)?,
        Format::Yaml => parse_yaml(content)?,
    };
    debug!(%format, bytes = content.len(), depth = tree.depth(), "parsed document");
    Ok(tree)
}

fn parse_json(content: &str) -> LoadResult<TreeValue> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| LoadError::parse(Format::Json, e))?;
    Ok(TreeValue::from(value))
}

fn parse_yaml(content: &str) -> LoadResult<TreeValue> {
    if content.trim().is_empty() {
        return Ok(TreeValue::Null);
    }
    let mut value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| LoadError::parse(Format::Yaml, e))?;
    value
        .apply_merge()
        .map_err(|e| LoadError::parse(Format::Yaml, e))?;
    TreeValue::try_from(value).map_err(|e| LoadError::parse(Format::Yaml, e))
}
