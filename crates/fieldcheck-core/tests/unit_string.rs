//! Tests for string fields


use serde_json::json;
use test_support::*;

#[test]
fn test_type_check() {
    let validator = single_field(json!({"type": ["string", "not a string"]}));
    for invalid in [json!(4), json!([]), json!({}), json!(true), json!(false)] {
        assert_eq!(message_for(&validator, invalid), Some("not a string".to_string()));
    }
    assert_eq!(message_for(&validator, json!("test")), None);
}

#[test]
fn test_optional_string_accepts_absent_and_empty() {
    let validator = single_field(json!({"type": ["string", "not a string"]}));
    assert!(validator.validate(&json!({})).is_empty());
    assert_eq!(message_for(&validator, json!(null)), None);
    assert_eq!(message_for(&validator, json!("")), None);
}

#[test]
fn test_max_length() {
    let validator = single_field(json!({
        "type": ["string", "s"],
        "max": [3, "3 characters maximum"]
    }));
    assert_eq!(message_for(&validator, json!("te")), None);
    assert_eq!(message_for(&validator, json!("tes")), None);
    assert_eq!(
        message_for(&validator, json!("test")),
        Some("3 characters maximum".to_string())
    );
}

#[test]
fn test_min_length() {
    let validator = single_field(json!({
        "type": ["string", "s"],
        "min": [3, "3 characters minimum"]
    }));
    for invalid in ["t", "te"] {
        assert_eq!(
            message_for(&validator, json!(invalid)),
            Some("3 characters minimum".to_string())
        );
    }
    assert_eq!(message_for(&validator, json!("tes")), None);
    assert_eq!(message_for(&validator, json!("testing")), None);
}

#[test]
fn test_trim_flag() {
    let trimmed = single_field(json!({
        "type": ["string", "s"],
        "min": [3, true, "too short"]
    }));
    let untrimmed = single_field(json!({
        "type": ["string", "s"],
        "min": [3, false, "too short"]
    }));
    assert_eq!(message_for(&trimmed, json!("  ab  ")), Some("too short".to_string()));
    assert_eq!(message_for(&untrimmed, json!("  ab  ")), None);

    let capped = single_field(json!({
        "type": ["string", "s"],
        "max": [2, true, "too long"]
    }));
    assert_eq!(message_for(&capped, json!("  ab  ")), None);
    assert_eq!(message_for(&capped, json!(" abc ")), Some("too long".to_string()));
}

#[test]
fn test_length_counts_characters() {
    let validator = single_field(json!({
        "type": ["string", "s"],
        "max": [4, "too long"]
    }));
    assert_eq!(message_for(&validator, json!("café")), None);
    assert_eq!(message_for(&validator, json!("日本語です")), Some("too long".to_string()));
}

#[test]
fn test_email() {
    let validator = single_field(json!({
        "type": ["string", "s"],
        "email": ["Invalid email"]
    }));
    for invalid in ["test", "tes@", "tes@test", "tes@test.", "tes@test.t"] {
        assert_eq!(
            message_for(&validator, json!(invalid)),
            Some("Invalid email".to_string()),
            "{invalid}"
        );
    }
    for valid in ["tes@test.co", "te@test.xyz"] {
        assert_eq!(message_for(&validator, json!(valid)), None, "{valid}");
    }
}

#[test]
fn test_match() {
    let validator = single_field(json!({
        "type": ["string", "s"],
        "match": ["^\\d{2}-\\d{2}-\\d{4}$", "The date format is DD-MM-YYYY"]
    }));
    for invalid in ["test", "dd-mm-2020", "2020-02-12", "02-2020-10", "00 00 0000"] {
        assert_eq!(
            message_for(&validator, json!(invalid)),
            Some("The date format is DD-MM-YYYY".to_string()),
            "{invalid}"
        );
    }
    for valid in ["02-02-2001", "00-00-0000"] {
        assert_eq!(message_for(&validator, json!(valid)), None, "{valid}");
    }
}

#[test]
fn test_enum() {
    let validator = single_field(json!({
        "type": ["string", "s"],
        "enum": [["M", "F"], "Take value M or F"]
    }));
    for invalid in ["m", "f", "masculine", "feminine", ""] {
        assert_eq!(
            message_for(&validator, json!(invalid)),
            Some("Take value M or F".to_string()),
            "{invalid}"
        );
    }
    assert_eq!(message_for(&validator, json!("M")), None);
    assert_eq!(message_for(&validator, json!("F")), None);
}

#[test]
fn test_one_error_for_each_invalid_field() {
    let validator = validator(json!({
        "name": {
            "type": ["string", "The name must be a string"],
            "required": ["The name is required"],
            "min": [5, "The name must consist of 5 characters minimum"],
            "max": [30, "The name must consist of 30 characters maximum"]
        },
        "sex": {
            "required": ["The sex is required"],
            "type": ["string", "The sex must be a string"],
            "enum": [["M", "F"], "Take value M or F"]
        },
        "date": {
            "type": ["string", "The date must be a string"],
            "match": ["^\\d{2}-\\d{2}-\\d{2}$", "is not a valid date"]
        },
        "email": {
            "required": ["The email is required"],
            "type": ["string", "The email must be a string"],
            "email": ["Invalid email"],
            "max": [15, "The email address must consist of 15 characters maximum"]
        }
    }));

    let errors = validator.validate(&json!({
        "email": "test@testing.testing",
        "sex": "m",
        "name": "Abc"
    }));
    assert_eq!(
        sorted(errors),
        vec![
            err("email", "The email address must consist of 15 characters maximum"),
            err("name", "The name must consist of 5 characters minimum"),
            err("sex", "Take value M or F"),
        ]
    );

    assert!(validator
        .validate(&json!({"email": "ab@test.co", "sex": "M", "name": "testing"}))
        .is_empty());
}
