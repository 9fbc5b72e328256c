//! Error message templating
//!
//! Messages may embed `{{field}}` and `{{value}}`. Substitution happens only
//! for the message of the failing step, once per reported error.

use serde_json::Value;

/// Placeholder replaced with the field name
pub const FIELD_PLACEHOLDER: &str = "{{field}}";

/// Placeholder replaced with the candidate value
pub const VALUE_PLACEHOLDER: &str = "{{value}}";

/// Substitute both placeholders in a message
pub fn render_message(message: &str, field: &str, candidate: Option<&Value>) -> String {
    if !message.contains("{{") {
        return message.to_string();
    }
    let rendered = message.replace(FIELD_PLACEHOLDER, field);
    if rendered.contains(VALUE_PLACEHOLDER) {
        rendered.replace(VALUE_PLACEHOLDER, &display_value(candidate))
    } else {
        rendered
    }
}

/// Textual form of a candidate: strings raw, a missing value as `undefined`,
/// anything else as compact JSON
pub fn display_value(candidate: Option<&Value>) -> String {
    match candidate {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
