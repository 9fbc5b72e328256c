//! Property-based tests for the validation engine
//!
//! These tests verify invariants that should hold for any record: at most one
//! error per schema field, determinism, and agreement with the predicates.


use fieldcheck_core::registry::predicates::{number, string};
use fieldcheck_core::ValidationConfig;
use proptest::prelude::*;
use serde_json::{json, Value};
use test_support::*;

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "[a-zA-Z0-9@. -]{0,30}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        10, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-z]{1,8}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for records that mostly use the person schema's field names
fn record_strategy() -> impl Strategy<Value = Value> {
    (
        proptest::option::of(json_value_strategy()),
        proptest::option::of(json_value_strategy()),
        proptest::option::of(json_value_strategy()),
    )
        .prop_map(|(name, age, date)| {
            let mut record = json!({});
            if let Some(v) = name {
                record["name"] = v;
            }
            if let Some(v) = age {
                record["age"] = v;
            }
            if let Some(v) = date {
                record["date"] = v;
            }
            record
        })
}

proptest! {
    /// Property: every reported field is a schema field, reported at most once
    #[test]
    fn prop_at_most_one_error_per_field(record in record_strategy()) {
        let validator = validator(person_schema());
        let errors = validator.validate(&record);

        prop_assert!(errors.len() <= 3);
        let mut fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        fields.dedup();
        prop_assert_eq!(fields.len(), errors.len());
        for field in fields {
            prop_assert!(["name", "age", "date"].contains(&field));
        }
    }

    /// Property: validating the same record twice gives the same errors
    #[test]
    fn prop_validation_is_deterministic(record in json_value_strategy()) {
        let validator = validator(person_schema());
        prop_assert_eq!(validator.validate(&record), validator.validate(&record));
    }

    /// Property: a required field is reported exactly when it is missing or blank
    #[test]
    fn prop_required_string(value in proptest::option::of("[ a-z]{0,6}")) {
        let validator = single_field(json!({
            "type": ["string", "type"],
            "required": ["required"]
        }));
        let record = match &value {
            Some(v) => json!({ "value": v }),
            None => json!({}),
        };
        let blank = value.as_deref().map_or(true, |v| v.trim().is_empty());
        let errors = validator.validate(&record);
        prop_assert_eq!(errors.is_empty(), !blank);
    }

    /// Property: the engine agrees with the length predicate
    #[test]
    fn prop_max_length_matches_predicate(text in "\\PC{0,12}", max in 0usize..10) {
        let validator = single_field(json!({
            "type": ["string", "type"],
            "max": [max, "too long"]
        }));
        let reported = message_for(&validator, json!(text)).is_some();
        prop_assert_eq!(reported, !string::has_max_length(&text, max, false));
    }

    /// Property: inclusive range check agrees with plain comparisons
    #[test]
    fn prop_between_matches_comparisons(value in -100.0f64..100.0, lower in -50i32..0, upper in 1i32..50) {
        let validator = single_field(json!({
            "type": ["number", "type"],
            "btw": [lower, upper, "out of range"]
        }));
        let inside = value >= f64::from(lower) && value <= f64::from(upper);
        prop_assert_eq!(message_for(&validator, json!(value)).is_none(), inside);
        prop_assert_eq!(number::is_between(&json!(value), f64::from(lower), f64::from(upper)), inside);
    }

    /// Property: numeric strings behave like the numbers they spell
    #[test]
    fn prop_numeric_strings_coerce(value in -1_000_000i64..1_000_000) {
        let as_string = json!(value.to_string());
        prop_assert_eq!(number::as_number(&as_string), Some(value as f64));
        prop_assert!(number::is_integer(&as_string));
    }

    /// Property: batch reports account for every checked record
    #[test]
    fn prop_batch_counts_are_consistent(
        records in proptest::collection::vec(record_strategy(), 0..20),
        fail_fast in any::<bool>(),
        max_errors in 0usize..6,
    ) {
        let validator = validator(person_schema());
        let mut config = ValidationConfig::new().with_max_errors(max_errors);
        config.fail_fast = fail_fast;
        let report = validator.validate_batch(&records, &config);

        prop_assert_eq!(report.total, records.len());
        prop_assert!(report.checked <= report.total);
        prop_assert_eq!(report.truncated, report.checked < report.total);
        prop_assert!(report.invalid.len() <= report.checked);
        if fail_fast {
            prop_assert!(report.invalid.len() <= 1);
        }
        for entry in &report.invalid {
            prop_assert_eq!(&entry.errors, &validator.validate(&records[entry.index]));
        }
    }
}
