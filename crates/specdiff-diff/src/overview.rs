//! Endpoint-level summary of a diff between two OpenAPI documents.
//!
//! Works purely on a finished [`DiffNode`] tree: the `paths` subtree is
//! walked and each HTTP-method key under a path item is treated as one
//! operation.

use std::fmt;

use serde::Serialize;
use specdiff_types::TreeValue;

use crate::metrics::DiffMetrics;
use crate::node::{DiffKind, DiffNode};

/// Keys of a path item that name operations.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// One operation: an HTTP method on a path template.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    /// Upper-case HTTP method.
    pub method: String,
    pub path: String,
}

impl Endpoint {
    fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// An operation present on both sides whose definition differs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangedOperation {
    #[serde(flatten)]
    pub endpoint: Endpoint,
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

/// Endpoint-level view of an OpenAPI comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOverview {
    pub title: Option<String>,
    /// No endpoint disappeared and no changed operation lost a field.
    pub compatible: bool,
    pub new_endpoints: Vec<Endpoint>,
    pub missing_endpoints: Vec<Endpoint>,
    pub deprecated_endpoints: Vec<Endpoint>,
    pub changed_operations: Vec<ChangedOperation>,
}

impl Default for ApiOverview {
    fn default() -> Self {
        Self {
            title: None,
            compatible: true,
            new_endpoints: Vec::new(),
            missing_endpoints: Vec::new(),
            deprecated_endpoints: Vec::new(),
            changed_operations: Vec::new(),
        }
    }
}

impl ApiOverview {
    /// Summarize a diff tree rooted at two OpenAPI documents.
    ///
    /// Documents without a `paths` mapping give an empty, compatible
    /// overview.
    pub fn from_diff(root: &DiffNode) -> Self {
        let mut overview = ApiOverview {
            title: title_of(root.after.as_ref()).or_else(|| title_of(root.before.as_ref())),
            ..Default::default()
        };

        if let Some(paths) = root.children.iter().find(|c| c.key == "paths") {
            if paths.is_leaf() {
                overview.compare_values(None, paths.before.as_ref(), paths.after.as_ref());
            } else {
                for item in &paths.children {
                    overview.visit_path_item(item);
                }
            }
        }

        overview.compatible = overview.missing_endpoints.is_empty()
            && overview.changed_operations.iter().all(|op| op.removed == 0);
        overview
    }

    /// Whether anything at the endpoint level differs.
    pub fn is_empty(&self) -> bool {
        self.new_endpoints.is_empty()
            && self.missing_endpoints.is_empty()
            && self.deprecated_endpoints.is_empty()
            && self.changed_operations.is_empty()
    }

    fn visit_path_item(&mut self, item: &DiffNode) {
        if item.is_leaf() {
            // Empty, scalar, or reshaped path item: compare operation sets.
            self.compare_values(Some(&item.key), item.before.as_ref(), item.after.as_ref());
            return;
        }
        for op in item.children.iter().filter(|c| is_method(&c.key)) {
            let endpoint = Endpoint::new(&op.key, &item.key);
            match op.kind {
                DiffKind::Added => self.new_endpoints.push(endpoint),
                DiffKind::Removed => self.missing_endpoints.push(endpoint),
                DiffKind::Unchanged => {}
                DiffKind::Changed => {
                    if became_deprecated(op) {
                        self.deprecated_endpoints.push(endpoint.clone());
                    }
                    let m = DiffMetrics::from_tree(op);
                    self.changed_operations.push(ChangedOperation {
                        endpoint,
                        added: m.added,
                        removed: m.removed,
                        changed: m.changed,
                    });
                }
            }
        }
    }

    /// Fallback for a `paths` table or path item that was replaced whole.
    /// With `path` unset, the values are entire `paths` tables.
    fn compare_values(
        &mut self,
        path: Option<&str>,
        before: Option<&TreeValue>,
        after: Option<&TreeValue>,
    ) {
        let old = operations(path, before);
        let new = operations(path, after);
        for endpoint in &old {
            if !new.contains(endpoint) {
                self.missing_endpoints.push(endpoint.clone());
            }
        }
        for endpoint in new {
            if !old.contains(&endpoint) {
                self.new_endpoints.push(endpoint);
            }
        }
    }
}

fn is_method(key: &str) -> bool {
    HTTP_METHODS.contains(&key)
}

fn title_of(doc: Option<&TreeValue>) -> Option<String> {
    doc?.get("info")?.get("title")?.as_str().map(str::to_string)
}

fn is_deprecated(op: Option<&TreeValue>) -> bool {
    op.and_then(|o| o.get("deprecated"))
        .and_then(TreeValue::as_bool)
        .unwrap_or(false)
}

fn became_deprecated(op: &DiffNode) -> bool {
    !is_deprecated(op.before.as_ref()) && is_deprecated(op.after.as_ref())
}

fn operations(path: Option<&str>, value: Option<&TreeValue>) -> Vec<Endpoint> {
    let Some(mapping) = value.and_then(TreeValue::as_mapping) else {
        return Vec::new();
    };
    match path {
        Some(path) => mapping
            .keys()
            .filter(|k| is_method(k))
            .map(|m| Endpoint::new(m, path))
            .collect(),
        None => mapping
            .iter()
            .flat_map(|(p, item)| operations(Some(p), Some(item)))
            .collect(),
    }
}
