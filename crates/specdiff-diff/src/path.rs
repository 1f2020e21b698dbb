//! Dot-joined node paths.
//!
//! A path is the keys (or sequence indices) from the root joined with `.`.
//! Keys are escaped so distinct positions never share a path:
//!
//! | key text | written as |
//! |----------|------------|
//! | `.`      | `\.`       |
//! | `\`      | `\\`       |
//! | empty    | `\0`       |

use std::borrow::Cow;

/// Key given to the synthetic root node.
pub const ROOT_KEY: &str = "root";

/// Escape a single key for use inside a path.
pub fn escape_key(key: &str) -> Cow<'_, str> {
    if key.is_empty() {
        return Cow::Borrowed("\\0");
    }
    if !key.contains(['.', '\\']) {
        return Cow::Borrowed(key);
    }
    let mut out = String::with_capacity(key.len() + 2);
    for c in key.chars() {
        if c == '.' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Path of child `key` under `parent`.
///
/// ```
/// use specdiff_diff::path::join;
///
/// assert_eq!(join("", "info"), "info");
/// assert_eq!(join("info", "title"), "info.title");
/// assert_eq!(join("servers", "0"), "servers.0");
/// assert_eq!(join("paths", "/v1.2/pets"), "paths./v1\\.2/pets");
/// ```
pub fn join(parent: &str, key: &str) -> String {
    let key = escape_key(key);
    if parent.is_empty() {
        key.into_owned()
    } else {
        format!("{parent}.{key}")
    }
}
