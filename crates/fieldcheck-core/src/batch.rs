//! Batch validation
//!
//! Runs one validator over many records, collecting a report per invalid
//! record. Fail-fast mode and an error cap bound the amount of work done on
//! large inputs.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use crate::engine::{FieldError, Validator};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Validation configuration for batch operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Whether to stop at the first invalid record
    pub fail_fast: bool,
    /// Maximum number of field errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of field errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Field errors of a single record, usable as an error value
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} field(s) failed validation:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Ok if no errors, Err otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Message reported for a field, if it failed
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.error.as_str())
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Errors of one invalid record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReport {
    /// Position of the record in the input
    pub index: usize,
    pub errors: Vec<FieldError>,
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Records in the input
    pub total: usize,
    /// Records actually validated
    pub checked: usize,
    /// One entry per invalid record, in input order
    pub invalid: Vec<RecordReport>,
    /// Whether validation stopped before the last record
    pub truncated: bool,
}

impl BatchReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Field errors across all records
    pub fn error_count(&self) -> usize {
        self.invalid.iter().map(|r| r.errors.len()).sum()
    }

    pub fn valid_count(&self) -> usize {
        self.checked - self.invalid.len()
    }
}

/// Validate every record with one validator
pub fn validate_batch(validator: &Validator, records: &[Value], config: &ValidationConfig) -> BatchReport {
    let mut report = BatchReport {
        total: records.len(),
        ..BatchReport::default()
    };
    let mut collected = 0;

    for (index, record) in records.iter().enumerate() {
        let errors = validator.validate(record);
        report.checked += 1;
        if errors.is_empty() {
            continue;
        }

        collected += errors.len();
        report.invalid.push(RecordReport { index, errors });

        if config.fail_fast || (config.max_errors > 0 && collected >= config.max_errors) {
            break;
        }
    }

    report.truncated = report.checked < report.total;
    debug!(
        total = report.total,
        checked = report.checked,
        invalid = report.invalid.len(),
        truncated = report.truncated,
        "Batch validation finished"
    );
    report
}
