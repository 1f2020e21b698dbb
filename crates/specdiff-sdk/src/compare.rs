use specdiff_diff::{diff_with_options, ApiOverview, DiffMetrics};
use specdiff_loader::{parse, Format, Resolver};
use specdiff_types::TreeValue;
use tracing::{debug, warn};

use crate::comparison::{Comparison, DocumentWarning, Side};
use crate::config::CompareConfig;
use crate::error::{CompareError, CompareResult};

/// Parse, optionally resolve, and diff two documents of the same format.
///
/// A syntax error in either document fails with [`CompareError::Load`]
/// naming the offending side. Unresolvable references are not errors; they
/// are returned in [`Comparison::warnings`].
pub fn compare_documents(
    previous: &str,
    current: &str,
    format: Format,
    config: &CompareConfig,
) -> CompareResult<Comparison> {
    let before = parse(previous, format).map_err(CompareError::load(Side::Previous))?;
    let after = parse(current, format).map_err(CompareError::load(Side::Current))?;
    compare_trees(before, after, config)
}

/// Diff two already parsed trees, resolving references first if
/// `config.resolve_refs` is set.
pub fn compare_trees(
    before: TreeValue,
    after: TreeValue,
    config: &CompareConfig,
) -> CompareResult<Comparison> {
    let mut warnings = Vec::new();
    let (before, after) = if config.resolve_refs {
        let resolver = Resolver::new(config.resolve.clone());
        (
            resolve_side(&resolver, &before, Side::Previous, &mut warnings),
            resolve_side(&resolver, &after, Side::Current, &mut warnings),
        )
    } else {
        (before, after)
    };

    let display = diff_with_options(&before, &after, &config.diff)?;
    let metrics = DiffMetrics::from_tree(&display);
    let overview = ApiOverview::from_diff(&display);
    debug!(%metrics, warnings = warnings.len(), "comparison complete");

    Ok(Comparison {
        display,
        metrics,
        overview,
        warnings,
    })
}

fn resolve_side(
    resolver: &Resolver,
    tree: &TreeValue,
    side: Side,
    warnings: &mut Vec<DocumentWarning>,
) -> TreeValue {
    let resolution = resolver.resolve(tree);
    for warning in resolution.warnings {
        warn!(document = %side, %warning, "reference not resolved");
        warnings.push(DocumentWarning {
            document: side,
            warning,
        });
    }
    resolution.value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use specdiff_diff::DiffKind;
    use specdiff_loader::ResolutionWarning;

    const PREVIOUS: &str = r##"{
        "openapi": "3.0.0",
        "info": {"title": "Pets"},
        "paths": {
            "/pets": {"get": {"responses": {"200": {"$ref": "#/components/responses/Ok"}}}}
        },
        "components": {"responses": {"Ok": {"description": "ok"}}}
    }"##;

    const CURRENT: &str = r##"
openapi: 3.0.0
info:
  title: Pets
paths:
  /pets:
    get:
      responses:
        "200":
          $ref: "#/components/responses/Ok"
components:
  responses:
    Ok:
      description: all good
"##;

    #[test]
    fn identical_documents() {
        let c = compare_documents(PREVIOUS, PREVIOUS, Format::Json, &CompareConfig::default()).unwrap();
        assert!(!c.has_changes());
        assert_eq!(c.display.kind, DiffKind::Unchanged);
        assert!(c.overview.is_empty());
        assert!(c.warnings.is_empty());
    }

    #[test]
    fn resolved_change_shows_inside_operation() {
        // JSON is a subset of YAML, so both sides parse as YAML.
        let config = CompareConfig::default().with_resolve_refs(true);
        let c = compare_documents(PREVIOUS, CURRENT, Format::Yaml, &config).unwrap();
        let node = c
            .display
            .find("paths./pets.get.responses.200.description")
            .expect("resolved response is diffed in place");
        assert_eq!(node.kind, DiffKind::Changed);
        assert_eq!(c.overview.changed_operations.len(), 1);
        assert!(c.overview.compatible);
    }

    #[test]
    fn unresolved_refs_compare_as_text() {
        let c = compare_documents(PREVIOUS, CURRENT, Format::Yaml, &CompareConfig::default()).unwrap();
        assert!(c.overview.changed_operations.is_empty());
        assert_eq!(c.metrics.changed, 1);
    }

    #[test]
    fn parse_error_names_the_side() {
        let err = compare_documents("{}", "{", Format::Json, &CompareConfig::default()).unwrap_err();
        match &err {
            CompareError::Load { side, .. } => assert_eq!(*side, Side::Current),
            other => panic!("expected Load, got {:?}", other),
        }
        assert!(err.to_string().starts_with("current document: failed to parse JSON document"));
    }

    #[test]
    fn warnings_are_tagged_with_their_document() {
        let before = TreeValue::from(json!({"a": {"$ref": "other.yaml#/x"}}));
        let after = TreeValue::from(json!({"a": {"$ref": "#/missing"}}));
        let config = CompareConfig::default().with_resolve_refs(true);
        let c = compare_trees(before, after, &config).unwrap();
        assert_eq!(c.warnings.len(), 2);
        assert_eq!(c.warnings[0].document, Side::Previous);
        assert!(matches!(c.warnings[0].warning, ResolutionWarning::External { .. }));
        assert_eq!(c.warnings[1].document, Side::Current);
        assert!(matches!(c.warnings[1].warning, ResolutionWarning::Dangling { .. }));

        let wire = serde_json::to_value(&c.warnings[0]).unwrap();
        assert_eq!(wire, json!({"document": "previous", "kind": "external", "reference": "other.yaml#/x"}));
    }

    #[test]
    fn diff_depth_limit_applies() {
        let mut config = CompareConfig::default();
        config.diff.max_depth = 1;
        let err = compare_documents(r#"{"a": {"b": 1}}"#, "{}", Format::Json, &config).unwrap_err();
        assert!(matches!(err, CompareError::Diff(_)));
    }
}
