//! Internal reference pointers (`#/a/b/c`) and lookup within a document.

use specdiff_types::{Mapping, TreeValue};

/// Key holding a reference inside a mapping.
pub const REF_KEY: &str = "$ref";

/// Key flagging a reference that was cut short because it loops.
pub const CIRCULAR_KEY: &str = "circular";

/// Prefix of a same-document pointer.
pub const INTERNAL_PREFIX: &str = "#/";

/// Maximum number of references followed while walking a single pointer.
const MAX_HOPS: usize = 64;

/// Why a pointer could not be followed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PointerError {
    /// Not a `#/` pointer into the same document.
    External,
    /// The pointer text itself is invalid.
    Malformed(String),
    /// The pointer is well formed but leads nowhere.
    Dangling(String),
}

/// Returns the `$ref` string of a mapping, if it has one.
pub fn reference_of(mapping: &Mapping) -> Option<&str> {
    mapping.get(REF_KEY).and_then(TreeValue::as_str)
}

/// Returns `true` if the mapping is exactly a circular-reference marker.
pub fn is_circular_marker(mapping: &Mapping) -> bool {
    mapping.len() == 2
        && reference_of(mapping).is_some()
        && mapping.get(CIRCULAR_KEY) == Some(&TreeValue::Bool(true))
}

/// Build the marker left in place of a reference that loops back on itself.
pub fn circular_marker(reference: &str) -> TreeValue {
    TreeValue::mapping([
        (REF_KEY, TreeValue::from(reference)),
        (CIRCULAR_KEY, TreeValue::Bool(true)),
    ])
}

/// Split an internal pointer into unescaped segments.
///
/// Segments follow RFC 6901: `~1` stands for `/` and `~0` for `~`. Empty
/// segments are rejected.
///
/// ```
/// use specdiff_loader::pointer::{parse_pointer, PointerError};
///
/// assert_eq!(
///     parse_pointer("#/paths/~1pets/get").unwrap(),
///     vec!["paths", "/pets", "get"],
/// );
/// assert_eq!(parse_pointer("other.yaml#/a"), Err(PointerError::External));
/// ```
pub fn parse_pointer(reference: &str) -> Result<Vec<String>, PointerError> {
    let body = reference
        .strip_prefix(INTERNAL_PREFIX)
        .ok_or(PointerError::External)?;
    body.split('/').map(unescape_segment).collect()
}

fn unescape_segment(segment: &str) -> Result<String, PointerError> {
    if segment.is_empty() {
        return Err(PointerError::Malformed("empty path segment".into()));
    }
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            other => {
                return Err(PointerError::Malformed(format!(
                    "invalid escape '~{}' in segment {segment:?}",
                    other.map(String::from).unwrap_or_default()
                )))
            }
        }
    }
    Ok(out)
}

/// Follow `segments` from `root`.
///
/// When the walk passes through a mapping that is itself an internal
/// reference, the reference is followed first; keys written next to the
/// `$ref` shadow the target's keys. The returned node may itself be a
/// reference; resolving it is the caller's job.
pub fn lookup<'t>(root: &'t TreeValue, segments: &[String]) -> Result<&'t TreeValue, PointerError> {
    lookup_with_hops(root, segments, 0)
}

fn lookup_with_hops<'t>(
    root: &'t TreeValue,
    segments: &[String],
    hops: usize,
) -> Result<&'t TreeValue, PointerError> {
    let mut current = root;
    let mut hops = hops;
    for (i, segment) in segments.iter().enumerate() {
        loop {
            match current {
                TreeValue::Mapping(m) => {
                    if let Some(next) = m.get(segment.as_str()) {
                        current = next;
                        break;
                    }
                    let Some(reference) = reference_of(m).filter(|r| r.starts_with(INTERNAL_PREFIX)) else {
                        return Err(PointerError::Dangling(format!(
                            "no key {segment:?} at /{}",
                            segments[..i].join("/")
                        )));
                    };
                    hops += 1;
                    if hops > MAX_HOPS {
                        return Err(PointerError::Dangling(format!(
                            "more than {MAX_HOPS} nested references while following {reference}"
                        )));
                    }
                    let via = parse_pointer(reference)?;
                    current = lookup_with_hops(root, &via, hops)?;
                }
                TreeValue::Sequence(items) => {
                    current = index_segment(segment)
                        .and_then(|idx| items.get(idx))
                        .ok_or_else(|| {
                            PointerError::Dangling(format!(
                                "no index {segment:?} in sequence of length {}",
                                items.len()
                            ))
                        })?;
                    break;
                }
                other => {
                    return Err(PointerError::Dangling(format!(
                        "cannot descend into {} at segment {segment:?}",
                        other.shape()
                    )))
                }
            }
        }
    }
    Ok(current)
}

fn index_segment(segment: &str) -> Option<usize> {
    if segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(v: serde_json::Value) -> TreeValue {
        TreeValue::from(v)
    }

    fn segs(pointer: &str) -> Vec<String> {
        parse_pointer(pointer).unwrap()
    }

    #[test]
    fn parse_simple_pointer() {
        assert_eq!(segs("#/components/schemas/Pet"), ["components", "schemas", "Pet"]);
    }

    #[test]
    fn parse_escapes() {
        assert_eq!(segs("#/a~0b/c~1d"), ["a~b", "c/d"]);
    }

    #[test]
    fn parse_rejects_bad_escape_and_empty_segment() {
        assert!(matches!(parse_pointer("#/a~2"), Err(PointerError::Malformed(_))));
        assert!(matches!(parse_pointer("#/a//b"), Err(PointerError::Malformed(_))));
        assert!(matches!(parse_pointer("#/"), Err(PointerError::Malformed(_))));
    }

    #[test]
    fn parse_external_forms() {
        assert_eq!(parse_pointer("#"), Err(PointerError::External));
        assert_eq!(parse_pointer("https://x/y.json#/a"), Err(PointerError::External));
        assert_eq!(parse_pointer("common.yaml"), Err(PointerError::External));
    }

    #[test]
    fn lookup_through_mappings_and_sequences() {
        let doc = tree(json!({"a": {"list": [10, {"b": "hit"}]}}));
        assert_eq!(lookup(&doc, &segs("#/a/list/1/b")).unwrap(), &TreeValue::from("hit"));
        assert_eq!(lookup(&doc, &segs("#/a/list/0")).unwrap(), &TreeValue::from(10));
    }

    #[test]
    fn lookup_missing_and_primitive() {
        let doc = tree(json!({"a": {"b": 1}, "s": [1]}));
        assert!(matches!(lookup(&doc, &segs("#/a/zz")), Err(PointerError::Dangling(_))));
        assert!(matches!(lookup(&doc, &segs("#/a/b/c")), Err(PointerError::Dangling(_))));
        assert!(matches!(lookup(&doc, &segs("#/s/5")), Err(PointerError::Dangling(_))));
        assert!(matches!(lookup(&doc, &segs("#/s/x")), Err(PointerError::Dangling(_))));
    }

    #[test]
    fn lookup_follows_intermediate_reference() {
        let doc = tree(json!({
            "alias": {"$ref": "#/real"},
            "real": {"inner": {"v": 1}}
        }));
        assert_eq!(lookup(&doc, &segs("#/alias/inner/v")).unwrap(), &TreeValue::from(1));
    }

    #[test]
    fn lookup_prefers_sibling_over_target() {
        let doc = tree(json!({
            "alias": {"$ref": "#/real", "v": "sibling"},
            "real": {"v": "target", "w": "only-target"}
        }));
        assert_eq!(lookup(&doc, &segs("#/alias/v")).unwrap(), &TreeValue::from("sibling"));
        assert_eq!(lookup(&doc, &segs("#/alias/w")).unwrap(), &TreeValue::from("only-target"));
    }

    #[test]
    fn lookup_terminates_on_reference_loop() {
        let doc = tree(json!({"a": {"$ref": "#/b"}, "b": {"$ref": "#/a"}}));
        assert!(matches!(lookup(&doc, &segs("#/a/x")), Err(PointerError::Dangling(_))));
    }

    #[test]
    fn marker_detection() {
        let marker = circular_marker("#/a");
        assert!(is_circular_marker(marker.as_mapping().unwrap()));
        let not_marker = tree(json!({"$ref": "#/a", "circular": false}));
        assert!(!is_circular_marker(not_marker.as_mapping().unwrap()));
    }
}
