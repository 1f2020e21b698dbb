//! Keyed structural comparison of two document trees.
//!
//! Mappings are matched by key and sequences by index; there is no
//! sequence alignment. Each position present on either side becomes exactly
//! one node, and every container's kind is derived from its children.

use serde::Serialize;
use specdiff_types::TreeValue;
use tracing::debug;

use crate::config::DiffOptions;
use crate::error::{DiffError, DiffResult};
use crate::node::{DiffKind, DiffNode};
use crate::path::{join, ROOT_KEY};

/// Diff two trees with default options.
pub fn diff(before: &TreeValue, after: &TreeValue) -> DiffResult<DiffNode> {
    diff_with_options(before, after, &DiffOptions::default())
}

/// Diff two trees.
///
/// Fails only when the inputs nest deeper than `options.max_depth`.
pub fn diff_with_options(
    before: &TreeValue,
    after: &TreeValue,
    options: &DiffOptions,
) -> DiffResult<DiffNode> {
    diff_optional(Some(before), Some(after), options)
}

/// Diff two possibly absent trees.
///
/// Absent is distinct from `null`: `(None, Some(v))` is an addition of `v`,
/// and `(None, None)` is an unchanged leaf with no values.
pub fn diff_optional(
    before: Option<&TreeValue>,
    after: Option<&TreeValue>,
    options: &DiffOptions,
) -> DiffResult<DiffNode> {
    let engine = Engine { options };
    let root = engine.compare(ROOT_KEY.to_string(), String::new(), before, after, 0)?;
    debug!(kind = %root.kind, children = root.children.len(), "diff complete");
    Ok(root)
}

/// Diff any two serializable values.
///
/// Both sides are first lowered into [`TreeValue`]; a value JSON cannot
/// express fails with [`DiffError::InvalidInput`].
pub fn diff_serialize<T: Serialize + ?Sized>(before: &T, after: &T) -> DiffResult<DiffNode> {
    let before = TreeValue::from_serialize(before)?;
    let after = TreeValue::from_serialize(after)?;
    diff(&before, &after)
}

struct Engine<'o> {
    options: &'o DiffOptions,
}

impl Engine<'_> {
    fn check_depth(&self, path: &str, depth: usize) -> DiffResult<()> {
        if depth > self.options.max_depth {
            return Err(DiffError::DepthExceeded {
                path: path.to_string(),
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    fn compare(
        &self,
        key: String,
        path: String,
        before: Option<&TreeValue>,
        after: Option<&TreeValue>,
        depth: usize,
    ) -> DiffResult<DiffNode> {
        self.check_depth(&path, depth)?;

        let (before, after) = match (before, after) {
            (None, None) => return Ok(DiffNode::leaf(key, path, DiffKind::Unchanged, None, None)),
            (Some(b), None) => return self.one_sided(key, path, b, DiffKind::Removed, depth),
            (None, Some(a)) => return self.one_sided(key, path, a, DiffKind::Added, depth),
            (Some(b), Some(a)) => (b, a),
        };

        let children = match (before, after) {
            (TreeValue::Mapping(bm), TreeValue::Mapping(am)) => {
                let mut children = Vec::with_capacity(bm.len().max(am.len()));
                for (k, bv) in bm {
                    let child_path = join(&path, k);
                    children.push(self.compare(k.clone(), child_path, Some(bv), am.get(k), depth + 1)?);
                }
                for (k, av) in am {
                    if bm.contains_key(k) {
                        continue;
                    }
                    let child_path = join(&path, k);
                    children.push(self.compare(k.clone(), child_path, None, Some(av), depth + 1)?);
                }
                children
            }
            (TreeValue::Sequence(bs), TreeValue::Sequence(as_)) => {
                let len = bs.len().max(as_.len());
                let mut children = Vec::with_capacity(len);
                for i in 0..len {
                    let index = i.to_string();
                    let child_path = join(&path, &index);
                    children.push(self.compare(index, child_path, bs.get(i), as_.get(i), depth + 1)?);
                }
                children
            }
            _ => {
                // Primitives, or two values of different shape.
                let kind = if before == after {
                    DiffKind::Unchanged
                } else {
                    DiffKind::Changed
                };
                return Ok(DiffNode::leaf(
                    key,
                    path,
                    kind,
                    Some(before.clone()),
                    Some(after.clone()),
                ));
            }
        };

        let kind = if children.iter().any(|c| c.kind != DiffKind::Unchanged) {
            DiffKind::Changed
        } else {
            DiffKind::Unchanged
        };
        Ok(DiffNode {
            key,
            path,
            kind,
            before: Some(before.clone()),
            after: Some(after.clone()),
            children,
        })
    }

    /// Emit `value` and everything under it with a single `kind`
    /// (`Added` or `Removed`).
    fn one_sided(
        &self,
        key: String,
        path: String,
        value: &TreeValue,
        kind: DiffKind,
        depth: usize,
    ) -> DiffResult<DiffNode> {
        self.check_depth(&path, depth)?;

        let children = match value {
            TreeValue::Mapping(m) => m
                .iter()
                .map(|(k, v)| self.one_sided(k.clone(), join(&path, k), v, kind, depth + 1))
                .collect::<DiffResult<Vec<_>>>()?,
            TreeValue::Sequence(s) => s
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let index = i.to_string();
                    let child_path = join(&path, &index);
                    self.one_sided(index, child_path, v, kind, depth + 1)
                })
                .collect::<DiffResult<Vec<_>>>()?,
            _ => Vec::new(),
        };

        let (before, after) = match kind {
            DiffKind::Added => (None, Some(value.clone())),
            _ => (Some(value.clone()), None),
        };
        Ok(DiffNode {
            key,
            path,
            kind,
            before,
            after,
            children,
        })
    }
}
