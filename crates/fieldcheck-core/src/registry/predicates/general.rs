//! Predicates shared by every type

use serde_json::Value;

/// The `required` check: present, non-null, and non-blank when a string.
/// `None` stands for a key missing from the input record.
pub fn is_defined(candidate: Option<&Value>) -> bool {
    match candidate {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Whether an optional field has nothing to check
pub fn is_absent(candidate: Option<&Value>) -> bool {
    candidate.map_or(true, Value::is_null)
}

pub fn is_boolean(value: &Value) -> bool {
    value.is_boolean()
}

/// JSON objects only; arrays and null are not objects
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}
