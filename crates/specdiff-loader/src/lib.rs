//! Document loading for specdiff.
//!
//! Turns raw JSON or YAML text into a [`TreeValue`] and optionally expands
//! internal `$ref` pointers (OpenAPI / JSON Schema style) in place.
//!
//! # Key Types
//!
//! - [`Format`] -- Declared document syntax
//! - [`parse`] -- Text → tree, failing with [`LoadError::Parse`]
//! - [`Resolver`] / [`Resolution`] -- Cycle-safe `$ref` expansion with warnings
//! - [`ResolutionWarning`] -- Non-fatal resolution problems
//!
//! [`TreeValue`]: specdiff_types::TreeValue

pub mod config;
pub mod error;
pub mod format;
pub mod parse;
pub mod pointer;
pub mod resolve;
pub mod warning;

pub use config::ResolveOptions;
pub use error::{LoadError, LoadResult};
pub use format::Format;
pub use parse::parse;
pub use resolve::{resolve_references, Resolution, Resolver};
pub use warning::ResolutionWarning;

use specdiff_types::TreeValue;

/// Parse `content` and, if `resolve_refs` is set, expand its internal
/// references with default bounds.
pub fn load(content: &str, format: Format, resolve_refs: bool) -> LoadResult<TreeValue> {
    let tree = parse(content, format)?;
    Ok(resolve_references(tree, resolve_refs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PETSTORE: &str = r##"
openapi: 3.0.0
info:
  title: Pets
paths:
  /pets:
    get:
      responses:
        "200":
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
components:
  schemas:
    Pet:
      type: object
      properties:
        name:
          type: string
"##;

    #[test]
    fn load_with_resolution() {
        let tree = load(PETSTORE, Format::Yaml, true).unwrap();
        let schema = tree
            .get("paths")
            .and_then(|p| p.get("/pets"))
            .and_then(|p| p.get("get"))
            .and_then(|g| g.get("responses"))
            .and_then(|r| r.get("200"))
            .and_then(|r| r.get("content"))
            .and_then(|c| c.get("application/json"))
            .and_then(|c| c.get("schema"))
            .unwrap();
        assert_eq!(
            schema,
            &TreeValue::from(json!({"type": "object", "properties": {"name": {"type": "string"}}}))
        );
    }

    #[test]
    fn load_without_resolution_keeps_refs() {
        let tree = load(PETSTORE, Format::Yaml, false).unwrap();
        assert!(tree.canonical_string().contains("\"$ref\":\"#/components/schemas/Pet\""));
    }

    #[test]
    fn load_propagates_parse_errors() {
        assert!(matches!(
            load("{", Format::Json, true),
            Err(LoadError::Parse { format: Format::Json, .. })
        ));
    }
}
