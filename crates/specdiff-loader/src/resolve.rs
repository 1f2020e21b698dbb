//! Internal `$ref` expansion.
//!
//! Every mapping whose `$ref` holds a `#/` pointer is replaced by the value
//! the pointer designates, itself resolved. Keys written next to `$ref` are
//! merged over a mapping target (the sibling wins on overlap).
//!
//! # Cycles
//!
//! The pointers being expanded on the current path are carried down as an
//! immutable [`Chain`] borrowed from the caller's stack frame. A pointer that
//! is already on the chain is not expanded again; the marker
//! `{"$ref": <pointer>, "circular": true}` takes its place. Nothing is shared
//! between sibling branches, so a pointer used twice without looping is
//! expanded both times.

use specdiff_types::{Mapping, TreeValue};
use tracing::{debug, warn};

use crate::config::ResolveOptions;
use crate::pointer::{
    circular_marker, is_circular_marker, lookup, parse_pointer, reference_of, PointerError,
    INTERNAL_PREFIX, REF_KEY,
};
use crate::warning::ResolutionWarning;

/// The output of one resolution pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// The document with internal references expanded.
    pub value: TreeValue,
    /// References that were left (wholly or partly) unresolved.
    pub warnings: Vec<ResolutionWarning>,
}

/// Expands internal references with configurable bounds.
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

impl Resolver {
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve every internal reference in `root`.
    pub fn resolve(&self, root: &TreeValue) -> Resolution {
        let mut pass = Pass {
            root,
            options: &self.options,
            expansions: 0,
            copied: 0,
            warnings: Vec::new(),
        };
        let value = pass.walk(root, None, 0);
        debug!(
            expansions = pass.expansions,
            copied = pass.copied,
            warnings = pass.warnings.len(),
            "resolved references"
        );
        Resolution {
            value,
            warnings: pass.warnings,
        }
    }
}

/// Resolve internal references when `enabled`, otherwise return `root`
/// untouched.
///
/// Uses default [`ResolveOptions`]; warnings are logged and dropped. Use
/// [`Resolver`] to inspect them.
///
/// ```
/// use serde_json::json;
/// use specdiff_loader::resolve_references;
/// use specdiff_types::TreeValue;
///
/// let doc = TreeValue::from(json!({
///     "a": {"$ref": "#/defs/x"},
///     "defs": {"x": {"type": "string"}}
/// }));
/// let resolved = resolve_references(doc, true);
/// assert_eq!(resolved.get("a"), Some(&TreeValue::from(json!({"type": "string"}))));
/// ```
pub fn resolve_references(root: TreeValue, enabled: bool) -> TreeValue {
    if !enabled {
        return root;
    }
    let resolution = Resolver::default().resolve(&root);
    for warning in &resolution.warnings {
        warn!(reference = warning.reference().unwrap_or_default(), "{warning}");
    }
    resolution.value
}

/// One link of the expansion path: a pointer and the links above it.
struct Chain<'a> {
    pointer: &'a str,
    parent: Option<&'a Chain<'a>>,
}

impl Chain<'_> {
    fn contains(link: Option<&Chain<'_>>, pointer: &str) -> bool {
        let mut cursor = link;
        while let Some(c) = cursor {
            if c.pointer == pointer {
                return true;
            }
            cursor = c.parent;
        }
        false
    }
}

/// Per-call state. Only the counters and the warning list are mutable; the
/// expansion chain travels down the call stack.
struct Pass<'r> {
    root: &'r TreeValue,
    options: &'r ResolveOptions,
    expansions: usize,
    /// Target nodes charged against `max_output_nodes` so far.
    copied: usize,
    warnings: Vec<ResolutionWarning>,
}

impl<'r> Pass<'r> {
    fn walk(&mut self, node: &'r TreeValue, chain: Option<&Chain<'_>>, depth: usize) -> TreeValue {
        let marker = node.as_mapping().is_some_and(is_circular_marker);
        if depth >= self.options.max_depth && node.is_container() && !marker {
            let warning = match node.as_mapping().and_then(reference_of) {
                Some(reference) => ResolutionWarning::LimitReached {
                    reference: reference.to_string(),
                    limit: "depth".to_string(),
                    value: self.options.max_depth,
                },
                None => ResolutionWarning::NestingTooDeep {
                    limit: self.options.max_depth,
                },
            };
            self.warnings.push(warning);
            return node.clone();
        }
        match node {
            TreeValue::Mapping(m) => match reference_of(m) {
                Some(reference) if is_circular_marker(m) => {
                    debug!(reference, "keeping circular marker");
                    node.clone()
                }
                Some(reference) if reference.starts_with(INTERNAL_PREFIX) => {
                    self.expand(m, reference, chain, depth)
                }
                Some(reference) => {
                    self.warnings.push(ResolutionWarning::External {
                        reference: reference.to_string(),
                    });
                    self.walk_mapping(m, chain, depth)
                }
                None => self.walk_mapping(m, chain, depth),
            },
            TreeValue::Sequence(items) => TreeValue::Sequence(
                items
                    .iter()
                    .map(|item| self.walk(item, chain, depth + 1))
                    .collect(),
            ),
            TreeValue::Null | TreeValue::Bool(_) | TreeValue::Number(_) | TreeValue::String(_) => {
                node.clone()
            }
        }
    }

    fn walk_mapping(&mut self, m: &'r Mapping, chain: Option<&Chain<'_>>, depth: usize) -> TreeValue {
        TreeValue::Mapping(
            m.iter()
                .map(|(k, v)| (k.clone(), self.walk(v, chain, depth + 1)))
                .collect(),
        )
    }

    fn expand(
        &mut self,
        m: &'r Mapping,
        reference: &'r str,
        chain: Option<&Chain<'_>>,
        depth: usize,
    ) -> TreeValue {
        if Chain::contains(chain, reference) {
            debug!(reference, "circular reference");
            return circular_marker(reference);
        }
        if self.expansions >= self.options.max_expansions {
            return self.limit_reached(m, reference, "expansion", self.options.max_expansions);
        }
        if self.copied >= self.options.max_output_nodes {
            return self.limit_reached(m, reference, "output", self.options.max_output_nodes);
        }

        let target = match parse_pointer(reference).and_then(|segments| lookup(self.root, &segments)) {
            Ok(target) => target,
            Err(err) => {
                self.warnings.push(unresolved(reference, err));
                return TreeValue::Mapping(m.clone());
            }
        };
        let cost = target.node_count();
        if cost > self.options.max_output_nodes - self.copied {
            // Saturate so later references fail without recounting.
            self.copied = self.options.max_output_nodes;
            return self.limit_reached(m, reference, "output", self.options.max_output_nodes);
        }
        self.copied += cost;
        self.expansions += 1;

        let link = Chain {
            pointer: reference,
            parent: chain,
        };
        let resolved = self.walk(target, Some(&link), depth + 1);

        let mut siblings = m.iter().filter(|(k, _)| k.as_str() != REF_KEY).peekable();
        if siblings.peek().is_none() {
            return resolved;
        }
        match resolved {
            TreeValue::Mapping(mut merged) => {
                for (k, v) in siblings {
                    let v = self.walk(v, chain, depth + 1);
                    merged.insert(k.clone(), v);
                }
                TreeValue::Mapping(merged)
            }
            other => {
                self.warnings.push(ResolutionWarning::SiblingsDiscarded {
                    reference: reference.to_string(),
                    target: other.shape().to_string(),
                });
                other
            }
        }
    }

    fn limit_reached(&mut self, m: &Mapping, reference: &str, limit: &str, value: usize) -> TreeValue {
        self.warnings.push(ResolutionWarning::LimitReached {
            reference: reference.to_string(),
            limit: limit.to_string(),
            value,
        });
        TreeValue::Mapping(m.clone())
    }
}

fn unresolved(reference: &str, err: PointerError) -> ResolutionWarning {
    let reference = reference.to_string();
    match err {
        PointerError::External => ResolutionWarning::External { reference },
        PointerError::Malformed(reason) => ResolutionWarning::Malformed { reference, reason },
        PointerError::Dangling(reason) => ResolutionWarning::Dangling { reference, reason },
    }
}
