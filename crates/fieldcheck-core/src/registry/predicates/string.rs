//! String predicates
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
        )
        .unwrap()
    })
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

fn length(value: &str, trim: bool) -> usize {
    if trim {
        value.trim().chars().count()
    } else {
        value.chars().count()
    }
}

pub fn has_min_length(value: &str, min: usize, trim: bool) -> bool {
    length(value, trim) >= min
}

pub fn has_max_length(value: &str, max: usize, trim: bool) -> bool {
    length(value, trim) <= max
}

/// Unanchored search, like a regex `match` call
pub fn has_match(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}

/// Case-sensitive membership
pub fn is_enum_of(value: &str, allowed: &[String]) -> bool {
    allowed.iter().any(|candidate| candidate == value)
}

pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value)
}
