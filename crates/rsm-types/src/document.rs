//! Helpers over `serde_json::Value` documents.
//!
//! Documents are plain `serde_json::Value` trees built with `preserve_order`,
//! so object keys keep the order in which agents declared them.

use serde_json::Value;

/// Runtime shape of a single value occurrence.
///
/// Classification is per occurrence: the same key may be a scalar in one
/// agent's document and an object in another's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    /// Bool, number, or string.
    Scalar,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a value by its shape.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => ValueKind::Scalar,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

/// Returns `true` for a missing slot or an explicit `null`.
pub fn is_absent(slot: Option<&Value>) -> bool {
    matches!(slot, None | Some(Value::Null))
}

/// Append `key` to an RFC 6901 JSON pointer.
pub fn pointer_push(base: &str, key: &str) -> String {
    let escaped = key.replace('~', "~0").replace('/', "~1");
    format!("{base}/{escaped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_shapes() {
        assert_eq!(ValueKind::of(&Value::Null), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Scalar);
        assert_eq!(ValueKind::of(&json!(4)), ValueKind::Scalar);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::Scalar);
        assert_eq!(ValueKind::of(&json!([1])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn absent_slots() {
        assert!(is_absent(None));
        assert!(is_absent(Some(&Value::Null)));
        assert!(!is_absent(Some(&json!(false))));
        assert!(!is_absent(Some(&json!(""))));
    }

    #[test]
    fn pointer_escapes_reserved_characters() {
        assert_eq!(pointer_push("", "Status"), "/Status");
        assert_eq!(pointer_push("/Oem", "Intel_RackScale"), "/Oem/Intel_RackScale");
        assert_eq!(pointer_push("", "a/b~c"), "/a~1b~0c");
    }
}
