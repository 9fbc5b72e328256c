//! Benchmarks for schema compilation and record validation
//!
//! Compilation happens once per schema while validation runs once per record,
//! so the validation paths are the ones worth watching.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldcheck_core::{SchemaConfig, ValidationConfig, Validator};
use serde_json::{json, Value};

fn create_schema() -> Value {
    json!({
        "name": {
            "type": ["string", "The name must be a string"],
            "required": ["The name is required"],
            "min": [2, true, "The name must consist of 2 characters minimum"],
            "max": [30, "The name must consist of 30 characters maximum"]
        },
        "email": {
            "type": ["string", "The email must be a string"],
            "required": ["The email is required"],
            "email": ["'{{value}}' is not a valid email"]
        },
        "sex": {
            "type": ["string", "The sex must be a string"],
            "enum": [["male", "female"], "Sex can only be 'male' or 'female'"]
        },
        "birthday": {
            "type": ["string", "The birthday must be a string"],
            "match": ["^\\d{4}-\\d{2}-\\d{2}$", "'{{value}}' is not a valid {{field}}"]
        },
        "age": {
            "type": ["number", "The age must be a number"],
            "integer": ["The age must be an integer"],
            "btw": [0, 130, "The age must be between 0 and 130"]
        },
        "tags": {
            "type": ["array", "The tags must be an array"],
            "ofType": ["string", "Every tag must be a string"],
            "ofMaxSize": [10, "At most 10 tags"]
        },
        "active": {
            "type": ["boolean", "The active flag must be a boolean"]
        }
    })
}

fn create_records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "name": format!("User {}", i),
                "email": if i % 5 == 0 { format!("user{}", i) } else { format!("user{}@example.com", i) },
                "sex": if i % 2 == 0 { "male" } else { "female" },
                "birthday": "1990-01-01",
                "age": (i % 150) as f64,
                "tags": ["a", "b"],
                "active": i % 3 == 0
            })
        })
        .collect()
}

fn bench_compile(c: &mut Criterion) {
    let config = SchemaConfig::from_value(create_schema()).unwrap();
    c.bench_function("compile_schema", |b| {
        b.iter(|| {
            let validator = Validator::new(black_box(&config));
            black_box(validator)
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let validator = Validator::from_value(create_schema()).unwrap();

    let cases = vec![
        ("valid", create_records(2).remove(1)),
        ("invalid_email", create_records(1).remove(0)),
        ("empty_record", json!({})),
    ];

    for (name, record) in cases {
        group.bench_with_input(BenchmarkId::new("record", name), &record, |b, record| {
            b.iter(|| {
                let errors = validator.validate(black_box(record));
                black_box(errors)
            })
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let validator = Validator::from_value(create_schema()).unwrap();

    for size in [100, 1000] {
        let records = create_records(size);
        group.bench_with_input(BenchmarkId::new("validate_batch", size), &records, |b, records| {
            b.iter(|| {
                let report = validator.validate_batch(black_box(records), &ValidationConfig::default());
                black_box(report)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compile, bench_validate, bench_batch);
criterion_main!(benches);
