//! Schema compilation
//!
//! Validates a schema configuration against the registry and turns each field
//! into a [`CompiledPipeline`]: the required/optional gate, the type check and
//! the remaining constraints in declaration order. Any configuration mistake
//! aborts compilation of the whole schema.
//!
//! - `pipeline`: the compiled representation and its execution
//! - `args`: typed parsing of constraint arguments
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

mod args;
pub mod pipeline;

pub use pipeline::{
    ArrayCheck, Check, CompiledPipeline, CompiledSchema, Comparison, Gate, GateOutcome, NumberCheck, Step,
    StringCheck, Verdict,
};

use crate::config::{FieldConfig, SchemaConfig, OPTIONAL_KEY, REQUIRED_KEY, TYPE_KEY};
use crate::error::ConfigError;
use crate::registry::FieldType;
use args::{parse_check, ArgContext};
use serde_json::Value;
use tracing::debug;

/// Compile every field of a schema; the first failing field aborts the build
pub fn compile_schema(config: &SchemaConfig) -> Result<CompiledSchema, ConfigError> {
    let fields = config
        .fields()
        .map(|(name, field_config)| Ok((name.to_string(), compile_field(name, field_config)?)))
        .collect::<Result<Vec<_>, ConfigError>>()?;

    debug!(fields = fields.len(), "Compiled schema");
    Ok(CompiledSchema::new(fields))
}

/// Compile the configuration of a single field
pub fn compile_field(field: &str, config: &FieldConfig) -> Result<CompiledPipeline, ConfigError> {
    let (field_type, type_message) = compile_type(field, config)?;
    let gate = compile_gate(field, field_type, config)?;

    let mut steps = Vec::with_capacity(config.len());
    steps.push(Step::new(TYPE_KEY, Check::Type(field_type), type_message));

    for (key, args) in config.rules() {
        if key == TYPE_KEY || key == REQUIRED_KEY {
            continue;
        }
        steps.push(compile_constraint(field, field_type, key, args)?);
    }

    let compiled = CompiledPipeline::new(gate, field_type, steps);
    debug!(
        field = %field,
        field_type = %field_type,
        required = compiled.is_required(),
        steps = compiled.step_count(),
        "Compiled field"
    );
    Ok(compiled)
}

fn compile_type(field: &str, config: &FieldConfig) -> Result<(FieldType, String), ConfigError> {
    let args = match config.get(TYPE_KEY) {
        Some(args) if !args.is_empty() => args,
        _ => {
            return Err(ConfigError::TypeNotSpecified {
                field: field.to_string(),
                valid: FieldType::valid_names(),
            })
        }
    };

    let field_type = args[0]
        .as_str()
        .and_then(FieldType::from_name)
        .ok_or_else(|| ConfigError::UnknownType {
            field: field.to_string(),
            type_name: display_arg(&args[0]),
            valid: FieldType::valid_names(),
        })?;

    if args.len() > 2 {
        return Err(ConfigError::ArgumentCount {
            field: field.to_string(),
            constraint: TYPE_KEY.to_string(),
            field_type: field_type.to_string(),
            expected: "2".to_string(),
            found: args.len(),
        });
    }

    let message = required_message(field, TYPE_KEY, args.get(1))
        .ok_or_else(|| ConfigError::MissingTypeMessage {
            field: field.to_string(),
        })??;
    Ok((field_type, message))
}

fn compile_gate(field: &str, field_type: FieldType, config: &FieldConfig) -> Result<Gate, ConfigError> {
    let Some(args) = config.get(REQUIRED_KEY) else {
        return Ok(Gate::Optional);
    };

    if args.len() > 1 {
        return Err(ConfigError::ArgumentCount {
            field: field.to_string(),
            constraint: REQUIRED_KEY.to_string(),
            field_type: field_type.to_string(),
            expected: "1".to_string(),
            found: args.len(),
        });
    }

    let message = required_message(field, REQUIRED_KEY, args.first())
        .ok_or_else(|| ConfigError::MissingRequiredMessage {
            field: field.to_string(),
        })??;
    Ok(Gate::Required { message })
}

/// `None` when the message is missing or empty, `Some(Err)` when it is not a string
fn required_message(field: &str, key: &str, value: Option<&Value>) -> Option<Result<String, ConfigError>> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(Ok(s.clone())),
        _ => Some(Err(ConfigError::MessageNotString {
            field: field.to_string(),
            constraint: key.to_string(),
        })),
    }
}

fn compile_constraint(field: &str, field_type: FieldType, key: &str, args: &[Value]) -> Result<Step, ConfigError> {
    if key == OPTIONAL_KEY {
        return Err(ConfigError::ReservedKey {
            field: field.to_string(),
            key: key.to_string(),
        });
    }

    let spec = field_type
        .constraint(key)
        .ok_or_else(|| ConfigError::UnknownConstraint {
            field: field.to_string(),
            constraint: key.to_string(),
            field_type: field_type.to_string(),
            valid: field_type.valid_constraint_names(),
        })?;

    let Some((message, positional)) = args.split_last().filter(|(_, rest)| spec.accepts_arg_count(rest.len()))
    else {
        return Err(ConfigError::ArgumentCount {
            field: field.to_string(),
            constraint: key.to_string(),
            field_type: field_type.to_string(),
            expected: spec.expected_list_len(),
            found: args.len(),
        });
    };

    let message = message
        .as_str()
        .ok_or_else(|| ConfigError::MessageNotString {
            field: field.to_string(),
            constraint: key.to_string(),
        })?;

    let ctx = ArgContext {
        field,
        field_type,
        spec,
    };
    let check = parse_check(&ctx, positional)?;
    Ok(Step::new(key, check, message))
}

fn display_arg(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
