//! Validation engine
//!
//! A [`Validator`] owns a compiled schema and runs it against input records.
//! Every schema field is evaluated on every call, including fields the record
//! does not contain; fields of the record that are not in the schema are
//! ignored. Each field reports at most one error: the templated message of
//! its first failing step.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use crate::batch::{self, BatchReport, ValidationConfig, ValidationErrors};
use crate::compiler::{compile_schema, CompiledSchema};
use crate::config::SchemaConfig;
use crate::error::Result;
use crate::template::render_message;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::trace;

/// A field that failed validation, with its rendered message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: error.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// Compiled, immutable validator for one schema
#[derive(Debug, Clone)]
pub struct Validator {
    schema: CompiledSchema,
}

impl Validator {
    /// Compile a schema configuration
    pub fn new(config: &SchemaConfig) -> Result<Self> {
        Ok(Self {
            schema: compile_schema(config)?,
        })
    }

    /// Parse and compile a schema given as a JSON value
    pub fn from_value(config: Value) -> Result<Self> {
        Self::new(&SchemaConfig::from_value(config)?)
    }

    /// Parse and compile a schema given as JSON text
    pub fn from_json_str(config: &str) -> Result<Self> {
        Self::new(&SchemaConfig::from_json_str(config)?)
    }

    pub fn schema(&self) -> &CompiledSchema {
        &self.schema
    }

    /// Validate one record. A record that is not a JSON object has no fields,
    /// so every schema field sees an absent value.
    pub fn validate(&self, record: &Value) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for (field, pipeline) in self.schema.fields() {
            let candidate = record.get(field);
            if let Some(message) = pipeline.run(candidate) {
                let error = render_message(message, field, candidate);
                trace!(field = %field, error = %error, "Field failed validation");
                errors.push(FieldError::new(field, error));
            }
        }

        errors
    }

    /// Validate one record, returning its errors as an `Err`
    pub fn check(&self, record: &Value) -> std::result::Result<(), ValidationErrors> {
        ValidationErrors::from(self.validate(record)).into_result()
    }

    /// Whether a record passes every field
    pub fn is_valid(&self, record: &Value) -> bool {
        self.validate(record).is_empty()
    }

    /// Validate many records
    pub fn validate_batch(&self, records: &[Value], config: &ValidationConfig) -> BatchReport {
        batch::validate_batch(self, records, config)
    }
}
