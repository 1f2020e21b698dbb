use std::fmt;

use serde::Serialize;
use specdiff_types::TreeValue;

use crate::path::ROOT_KEY;

/// Classification of one diff node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl DiffKind {
    /// Lowercase name, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            DiffKind::Added => "added",
            DiffKind::Removed => "removed",
            DiffKind::Changed => "changed",
            DiffKind::Unchanged => "unchanged",
        }
    }

    /// The kind seen from the other side: `Added` and `Removed` swap.
    pub fn inverted(self) -> Self {
        match self {
            DiffKind::Added => DiffKind::Removed,
            DiffKind::Removed => DiffKind::Added,
            other => other,
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a diff tree.
///
/// `before` is absent for [`DiffKind::Added`] nodes and `after` is absent for
/// [`DiffKind::Removed`] nodes; every other node carries both snapshots.
/// Container nodes hold their children in display order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffNode {
    pub key: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: DiffKind,
    #[serde(rename = "value1", skip_serializing_if = "Option::is_none")]
    pub before: Option<TreeValue>,
    #[serde(rename = "value2", skip_serializing_if = "Option::is_none")]
    pub after: Option<TreeValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DiffNode>,
}

impl DiffNode {
    /// A node without children.
    pub fn leaf(
        key: impl Into<String>,
        path: impl Into<String>,
        kind: DiffKind,
        before: Option<TreeValue>,
        after: Option<TreeValue>,
    ) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            kind,
            before,
            after,
            children: Vec::new(),
        }
    }

    /// Whether this node is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.path.is_empty() && self.key == ROOT_KEY
    }

    /// Whether this node has no children. Leaves are what metrics count.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order iterator over this node and all descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// All leaves below (or at) this node, in display order.
    pub fn leaves(&self) -> impl Iterator<Item = &DiffNode> {
        self.iter().filter(|n| n.is_leaf())
    }

    /// Find the node with the given (escaped) path.
    pub fn find(&self, path: &str) -> Option<&DiffNode> {
        self.iter().find(|n| n.path == path)
    }

    /// The same diff seen from the other side: `Added` and `Removed` swap,
    /// and so do `before` and `after`.
    pub fn inverted(&self) -> DiffNode {
        DiffNode {
            key: self.key.clone(),
            path: self.path.clone(),
            kind: self.kind.inverted(),
            before: self.after.clone(),
            after: self.before.clone(),
            children: self.children.iter().map(DiffNode::inverted).collect(),
        }
    }
}

/// Pre-order traversal over a [`DiffNode`] tree.
///
/// Uses an explicit stack so deep trees do not recurse.
pub struct Iter<'a> {
    stack: Vec<&'a DiffNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a DiffNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DiffNode {
        DiffNode {
            key: "root".into(),
            path: String::new(),
            kind: DiffKind::Changed,
            before: Some(TreeValue::from(json!({"a": 1, "b": 2}))),
            after: Some(TreeValue::from(json!({"a": 1, "c": 3}))),
            children: vec![
                DiffNode::leaf("a", "a", DiffKind::Unchanged, Some(1.into()), Some(1.into())),
                DiffNode::leaf("b", "b", DiffKind::Removed, Some(2.into()), None),
                DiffNode::leaf("c", "c", DiffKind::Added, None, Some(3.into())),
            ],
        }
    }

    #[test]
    fn iter_is_preorder() {
        let tree = sample();
        let paths: Vec<&str> = tree.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["", "a", "b", "c"]);
        assert_eq!(tree.leaves().count(), 3);
        assert!(tree.is_root());
        assert!(!tree.is_leaf());
    }

    #[test]
    fn find_by_path() {
        let tree = sample();
        assert_eq!(tree.find("b").map(|n| n.kind), Some(DiffKind::Removed));
        assert!(tree.find("z").is_none());
    }

    #[test]
    fn inverted_swaps_sides() {
        let inv = sample().inverted();
        let b = inv.find("b").unwrap();
        assert_eq!(b.kind, DiffKind::Added);
        assert_eq!(b.before, None);
        assert_eq!(b.after, Some(2.into()));
        assert_eq!(inv.kind, DiffKind::Changed);
        assert_eq!(inv.inverted(), sample());
    }

    #[test]
    fn wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "changed");
        assert_eq!(value["children"][1], json!({"key": "b", "path": "b", "type": "removed", "value1": 2}));
        assert_eq!(value["children"][2]["value2"], 3);
        assert!(value["children"][0].get("children").is_none());
    }
}
