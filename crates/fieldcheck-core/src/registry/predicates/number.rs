//! Number predicates
//!
//! A candidate coerces to a number when it is a JSON number or a string whose
//! trimmed form is non-empty and parses as a finite float. Every comparison
//! runs on the coerced value and fails when there is none.

use serde_json::Value;

/// Numeric view of a candidate, if it has one
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

pub fn is_number(value: &Value) -> bool {
    as_number(value).is_some()
}

pub fn is_integer(value: &Value) -> bool {
    as_number(value).is_some_and(|v| v.fract() == 0.0)
}

pub fn is_lower_or_equal(value: &Value, bound: f64) -> bool {
    as_number(value).is_some_and(|v| v <= bound)
}

pub fn is_greater_or_equal(value: &Value, bound: f64) -> bool {
    as_number(value).is_some_and(|v| v >= bound)
}

pub fn is_equal(value: &Value, expected: f64) -> bool {
    as_number(value).is_some_and(|v| v == expected)
}

pub fn is_greater_than(value: &Value, bound: f64) -> bool {
    as_number(value).is_some_and(|v| v > bound)
}

pub fn is_lower_than(value: &Value, bound: f64) -> bool {
    as_number(value).is_some_and(|v| v < bound)
}

/// Inclusive on both ends
pub fn is_between(value: &Value, lower: f64, upper: f64) -> bool {
    as_number(value).is_some_and(|v| v >= lower && v <= upper)
}
