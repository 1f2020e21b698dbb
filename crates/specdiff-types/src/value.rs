//! The generic document tree.
//!
//! [`TreeValue`] is the single representation every parsed JSON or YAML
//! document is lowered into. It is a closed sum type; every traversal in the
//! workspace matches it exhaustively.
//!
//! # Equality
//!
//! - Mapping key order is preserved for display but ignored by `==`.
//! - Numbers compare by canonical text (see [`crate::number`]).
//! - `Null` is a value of its own; it never equals a missing entry.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Number;

use crate::error::{TypeError, TypeResult};
use crate::number::{canonical_number, numbers_equal};

/// Ordered key → value table used by [`TreeValue::Mapping`].
pub type Mapping = IndexMap<String, TreeValue>;

/// A parsed document value.
#[derive(Clone, Debug)]
pub enum TreeValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Mapping(Mapping),
    Sequence(Vec<TreeValue>),
}

/// Coarse shape of a value, used to decide whether two values can be
/// compared structurally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Bool,
    Number,
    String,
    Mapping,
    Sequence,
}

impl Shape {
    /// Human-readable name of the shape.
    pub fn name(self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool => "boolean",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Mapping => "mapping",
            Shape::Sequence => "sequence",
        }
    }

    /// Returns `true` for mappings and sequences.
    pub fn is_container(self) -> bool {
        matches!(self, Shape::Mapping | Shape::Sequence)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TreeValue {
    /// Build a mapping from key/value pairs, keeping their order.
    ///
    /// Later duplicates overwrite earlier values in place.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TreeValue)>,
    {
        TreeValue::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The shape of this value.
    pub fn shape(&self) -> Shape {
        match self {
            TreeValue::Null => Shape::Null,
            TreeValue::Bool(_) => Shape::Bool,
            TreeValue::Number(_) => Shape::Number,
            TreeValue::String(_) => Shape::String,
            TreeValue::Mapping(_) => Shape::Mapping,
            TreeValue::Sequence(_) => Shape::Sequence,
        }
    }

    /// Returns `true` for mappings and sequences.
    pub fn is_container(&self) -> bool {
        self.shape().is_container()
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            TreeValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[TreeValue]> {
        match self {
            TreeValue::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TreeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TreeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Look up a mapping entry by key. Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Maximum nesting depth. Scalars and empty containers have depth 1.
    pub fn depth(&self) -> usize {
        match self {
            TreeValue::Mapping(m) => 1 + m.values().map(TreeValue::depth).max().unwrap_or(0),
            TreeValue::Sequence(s) => 1 + s.iter().map(TreeValue::depth).max().unwrap_or(0),
            _ => 1,
        }
    }

    /// Number of nodes in the tree, counting every container and scalar.
    pub fn node_count(&self) -> usize {
        match self {
            TreeValue::Mapping(m) => 1 + m.values().map(TreeValue::node_count).sum::<usize>(),
            TreeValue::Sequence(s) => 1 + s.iter().map(TreeValue::node_count).sum::<usize>(),
            _ => 1,
        }
    }

    /// Stable serialization used for value comparison.
    ///
    /// Compact JSON with mapping keys sorted and numbers in canonical form,
    /// so two values are equal exactly when their canonical strings are.
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        write_canonical(self, &mut out);
        out
    }

    /// Convert to a `serde_json::Value`, preserving mapping order.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TreeValue::Null => serde_json::Value::Null,
            TreeValue::Bool(b) => serde_json::Value::Bool(*b),
            TreeValue::Number(n) => serde_json::Value::Number(n.clone()),
            TreeValue::String(s) => serde_json::Value::String(s.clone()),
            TreeValue::Mapping(m) => serde_json::Value::Object(
                m.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            TreeValue::Sequence(s) => {
                serde_json::Value::Array(s.iter().map(TreeValue::to_json).collect())
            }
        }
    }

    /// Convert any serializable value into a tree.
    ///
    /// Fails for values JSON cannot express (non-string map keys, for
    /// example).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> TypeResult<Self> {
        serde_json::to_value(value)
            .map(TreeValue::from)
            .map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

fn write_canonical(value: &TreeValue, out: &mut String) {
    match value {
        TreeValue::Null => out.push_str("null"),
        TreeValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        TreeValue::Number(n) => out.push_str(&canonical_number(n)),
        TreeValue::String(s) => write_json_string(s, out),
        TreeValue::Mapping(m) => {
            let mut keys: Vec<&String> = m.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_string(key, out);
                out.push(':');
                write_canonical(&m[key.as_str()], out);
            }
            out.push('}');
        }
        TreeValue::Sequence(s) => {
            out.push('[');
            for (i, item) in s.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
    }
}

fn write_json_string(s: &str, out: &mut String) {
    // Serializing a plain `str` cannot fail.
    out.push_str(&serde_json::to_string(s).unwrap_or_default());
}

impl PartialEq for TreeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TreeValue::Null, TreeValue::Null) => true,
            (TreeValue::Bool(a), TreeValue::Bool(b)) => a == b,
            (TreeValue::Number(a), TreeValue::Number(b)) => numbers_equal(a, b),
            (TreeValue::String(a), TreeValue::String(b)) => a == b,
            // IndexMap equality ignores insertion order.
            (TreeValue::Mapping(a), TreeValue::Mapping(b)) => a == b,
            (TreeValue::Sequence(a), TreeValue::Sequence(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for TreeValue {}

impl fmt::Display for TreeValue {
    /// Compact JSON in document order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for TreeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeValue::Null => serializer.serialize_unit(),
            TreeValue::Bool(b) => serializer.serialize_bool(*b),
            TreeValue::Number(n) => n.serialize(serializer),
            TreeValue::String(s) => serializer.serialize_str(s),
            TreeValue::Mapping(m) => {
                let mut map = serializer.serialize_map(Some(m.len()))?;
                for (k, v) in m {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            TreeValue::Sequence(s) => {
                let mut seq = serializer.serialize_seq(Some(s.len()))?;
                for item in s {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl From<serde_json::Value> for TreeValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TreeValue::Null,
            serde_json::Value::Bool(b) => TreeValue::Bool(b),
            serde_json::Value::Number(n) => TreeValue::Number(n),
            serde_json::Value::String(s) => TreeValue::String(s),
            serde_json::Value::Array(items) => {
                TreeValue::Sequence(items.into_iter().map(TreeValue::from).collect())
            }
            serde_json::Value::Object(map) => TreeValue::Mapping(
                map.into_iter().map(|(k, v)| (k, TreeValue::from(v))).collect(),
            ),
        }
    }
}

impl From<&TreeValue> for serde_json::Value {
    fn from(value: &TreeValue) -> Self {
        value.to_json()
    }
}

impl From<bool> for TreeValue {
    fn from(b: bool) -> Self {
        TreeValue::Bool(b)
    }
}

impl From<&str> for TreeValue {
    fn from(s: &str) -> Self {
        TreeValue::String(s.to_string())
    }
}

impl From<String> for TreeValue {
    fn from(s: String) -> Self {
        TreeValue::String(s)
    }
}

impl From<i64> for TreeValue {
    fn from(i: i64) -> Self {
        TreeValue::Number(Number::from(i))
    }
}

impl TryFrom<serde_yaml::Value> for TreeValue {
    type Error = TypeError;

    /// Lower a YAML value.
    ///
    /// Tags are dropped, scalar keys are stringified, and complex keys or
    /// non-finite floats are rejected. Merge keys must be applied by the
    /// caller beforehand.
    fn try_from(value: serde_yaml::Value) -> TypeResult<Self> {
        match value {
            serde_yaml::Value::Null => Ok(TreeValue::Null),
            serde_yaml::Value::Bool(b) => Ok(TreeValue::Bool(b)),
            serde_yaml::Value::Number(n) => yaml_number(&n).map(TreeValue::Number),
            serde_yaml::Value::String(s) => Ok(TreeValue::String(s)),
            serde_yaml::Value::Sequence(items) => items
                .into_iter()
                .map(TreeValue::try_from)
                .collect::<TypeResult<Vec<_>>>()
                .map(TreeValue::Sequence),
            serde_yaml::Value::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(yaml_key(k)?, TreeValue::try_from(v)?);
                }
                Ok(TreeValue::Mapping(out))
            }
            serde_yaml::Value::Tagged(tagged) => TreeValue::try_from(tagged.value),
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> TypeResult<Number> {
    if let Some(i) = n.as_i64() {
        return Ok(Number::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Number::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| TypeError::NonFiniteNumber(n.to_string()))
}

fn yaml_key(key: serde_yaml::Value) -> TypeResult<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(canonical_number(&yaml_number(&n)?)),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Sequence(_) => Err(TypeError::UnsupportedValue(
            "sequence used as a mapping key".into(),
        )),
        serde_yaml::Value::Mapping(_) => Err(TypeError::UnsupportedValue(
            "mapping used as a mapping key".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn mapping_order_ignored_for_equality() {
        let a = TreeValue::from(json!({"a": 1, "b": 2}));
        let b = TreeValue::from(json!({"b": 2, "a": 1}));
        assert_eq!(a, b);
        assert_eq!(a.canonical_string(), b.canonical_string());
    }

    #[test]
    fn mapping_order_preserved_for_display() {
        let v = TreeValue::from(json!({"z": 1, "a": 2}));
        let keys: Vec<&String> = v.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a"]);
        assert_eq!(v.to_string(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn canonical_string_sorts_and_normalizes() {
        let v = TreeValue::from(json!({"b": [1.0, "x"], "a": null}));
        assert_eq!(v.canonical_string(), r#"{"a":null,"b":[1,"x"]}"#);
    }

    #[test]
    fn string_and_number_differ() {
        assert_ne!(TreeValue::from(json!("1")), TreeValue::from(json!(1)));
        assert_ne!(TreeValue::Null, TreeValue::from(json!(false)));
    }

    #[test]
    fn depth_counts_nesting() {
        assert_eq!(TreeValue::Null.depth(), 1);
        assert_eq!(TreeValue::from(json!({})).depth(), 1);
        assert_eq!(TreeValue::from(json!({"a": {"b": [1]}})).depth(), 4);
    }

    #[test]
    fn node_count_includes_containers() {
        assert_eq!(TreeValue::Null.node_count(), 1);
        assert_eq!(TreeValue::from(json!({})).node_count(), 1);
        assert_eq!(TreeValue::from(json!({"a": {"b": [1, 2]}, "c": "x"})).node_count(), 6);
    }

    #[test]
    fn json_roundtrip_keeps_order() {
        let original = json!({"paths": {"/b": {}, "/a": {}}, "info": {"title": "x"}});
        let tree = TreeValue::from(original.clone());
        assert_eq!(tree.to_json(), original);
        assert_eq!(serde_json::to_value(&tree).unwrap(), original);
    }

    #[test]
    fn yaml_scalar_keys_stringified() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("200: ok\ntrue: yes\n~: nothing\n").unwrap();
        let tree = TreeValue::try_from(yaml).unwrap();
        let keys: Vec<&String> = tree.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, ["200", "true", "null"]);
    }

    #[test]
    fn yaml_tags_unwrapped() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("value: !custom 5\n").unwrap();
        let tree = TreeValue::try_from(yaml).unwrap();
        assert_eq!(tree.get("value"), Some(&TreeValue::from(5)));
    }

    #[test]
    fn yaml_non_finite_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("x: .nan\n").unwrap();
        assert!(matches!(
            TreeValue::try_from(yaml),
            Err(TypeError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn yaml_complex_key_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: 1\n").unwrap();
        assert!(matches!(
            TreeValue::try_from(yaml),
            Err(TypeError::UnsupportedValue(_))
        ));
    }

    #[test]
    fn from_serialize_rejects_non_string_keys() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(
            TreeValue::from_serialize(&map),
            Err(TypeError::Serialization(_))
        ));
    }

    fn arb_json() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::Bool),
            any::<i32>().prop_map(|i| json!(i)),
            "[a-z]{0,4}".prop_map(serde_json::Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
                prop::collection::btree_map("[a-c]", inner, 0..4)
                    .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn equality_agrees_with_canonical_string(a in arb_json(), b in arb_json()) {
            let (ta, tb) = (TreeValue::from(a), TreeValue::from(b));
            prop_assert_eq!(ta == tb, ta.canonical_string() == tb.canonical_string());
        }

        #[test]
        fn canonical_string_is_valid_json(a in arb_json()) {
            let tree = TreeValue::from(a);
            let reparsed: serde_json::Value = serde_json::from_str(&tree.canonical_string()).unwrap();
            prop_assert_eq!(TreeValue::from(reparsed), tree);
        }
    }
}
