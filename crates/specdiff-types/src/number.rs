//! Canonical textual form of JSON numbers.
//!
//! Two numbers are equal when their canonical text is equal. Integral floats
//! inside the exactly-representable range collapse onto the integer form, so
//! `1`, `1.0` and `1e0` all compare equal while `1` and `"1"` do not.

use serde_json::Number;

/// Largest integer magnitude an `f64` represents exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Render `n` in canonical form.
pub fn canonical_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER => (f as i64).to_string(),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Returns `true` if both numbers have the same canonical text.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    canonical_number(a) == canonical_number(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: serde_json::Value) -> Number {
        match v {
            serde_json::Value::Number(n) => n,
            other => panic!("not a number: {other}"),
        }
    }

    #[test]
    fn integers_print_plainly() {
        assert_eq!(canonical_number(&num(serde_json::json!(42))), "42");
        assert_eq!(canonical_number(&num(serde_json::json!(-7))), "-7");
        assert_eq!(canonical_number(&num(serde_json::json!(u64::MAX))), u64::MAX.to_string());
    }

    #[test]
    fn integral_float_matches_integer() {
        assert!(numbers_equal(&num(serde_json::json!(1.0)), &num(serde_json::json!(1))));
        assert_eq!(canonical_number(&num(serde_json::json!(-0.0))), "0");
    }

    #[test]
    fn fractional_float_kept() {
        assert_eq!(canonical_number(&num(serde_json::json!(1.5))), "1.5");
        assert!(!numbers_equal(&num(serde_json::json!(1.5)), &num(serde_json::json!(1.25))));
    }

    #[test]
    fn huge_float_not_truncated() {
        let big = num(serde_json::json!(1e300));
        assert_ne!(canonical_number(&big), (1e300_f64 as i64).to_string());
    }
}
