//! Typed argument parsing
//!
//! Turns the positional JSON arguments of a constraint into a [`Check`].
//! Argument counts are validated before this point.

use super::pipeline::{ArrayCheck, Check, Comparison, NumberCheck, StringCheck};
use crate::error::ConfigError;
use crate::registry::{ConstraintKind, ConstraintSpec, ElementType, FieldType};
use regex::Regex;
use serde_json::Value;

/// Context for argument errors
pub(crate) struct ArgContext<'a> {
    pub field: &'a str,
    pub field_type: FieldType,
    pub spec: &'static ConstraintSpec,
}

impl ArgContext<'_> {
    fn invalid(&self, expected: &'static str) -> ConfigError {
        ConfigError::InvalidArgument {
            field: self.field.to_string(),
            constraint: self.spec.name.to_string(),
            field_type: self.field_type.to_string(),
            expected,
        }
    }

    fn number(&self, value: &Value) -> Result<f64, ConfigError> {
        value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid("a finite number"))
    }

    fn size(&self, value: &Value) -> Result<usize, ConfigError> {
        value
            .as_u64()
            // integral floats such as `2.0`
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
                    .map(|v| v as u64)
            })
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| self.invalid("a non-negative integer"))
    }

    /// Optional trailing trim flag of the length bounds
    fn trim_flag(&self, args: &[Value]) -> Result<bool, ConfigError> {
        match args.get(self.spec.arg_count) {
            None => Ok(false),
            Some(Value::Bool(flag)) => Ok(*flag),
            Some(_) => Err(self.invalid("a boolean trim flag after the length")),
        }
    }
}

/// Parse positional arguments (message excluded) into a check
pub(crate) fn parse_check(ctx: &ArgContext<'_>, args: &[Value]) -> Result<Check, ConfigError> {
    let check = match ctx.spec.kind {
        ConstraintKind::MinLength => Check::String(StringCheck::MinLength {
            min: ctx.size(&args[0])?,
            trim: ctx.trim_flag(args)?,
        }),
        ConstraintKind::MaxLength => Check::String(StringCheck::MaxLength {
            max: ctx.size(&args[0])?,
            trim: ctx.trim_flag(args)?,
        }),
        ConstraintKind::Match => Check::String(StringCheck::Match(parse_pattern(ctx, &args[0])?)),
        ConstraintKind::Enum => Check::String(StringCheck::Enum(parse_string_list(ctx, &args[0])?)),
        ConstraintKind::Email => Check::String(StringCheck::Email),
        ConstraintKind::Integer => Check::Number(NumberCheck::Integer),
        ConstraintKind::LowerOrEqual => compare(ctx, Comparison::Le, &args[0])?,
        ConstraintKind::GreaterOrEqual => compare(ctx, Comparison::Ge, &args[0])?,
        ConstraintKind::Equal => compare(ctx, Comparison::Eq, &args[0])?,
        ConstraintKind::GreaterThan => compare(ctx, Comparison::Gt, &args[0])?,
        ConstraintKind::LowerThan => compare(ctx, Comparison::Lt, &args[0])?,
        ConstraintKind::Between => {
            let lower = ctx.number(&args[0])?;
            let upper = ctx.number(&args[1])?;
            if lower >= upper {
                return Err(ConfigError::InvalidRange {
                    field: ctx.field.to_string(),
                    constraint: ctx.spec.name.to_string(),
                    lower,
                    upper,
                });
            }
            Check::Number(NumberCheck::Between { lower, upper })
        }
        ConstraintKind::OfType => {
            let element_type = args[0]
                .as_str()
                .and_then(ElementType::from_name)
                .ok_or_else(|| ctx.invalid("one of \"string\" | \"number\" | \"boolean\" | \"object\""))?;
            Check::Array(ArrayCheck::OfType(element_type))
        }
        ConstraintKind::OfMinSize => Check::Array(ArrayCheck::MinSize(ctx.size(&args[0])?)),
        ConstraintKind::OfMaxSize => Check::Array(ArrayCheck::MaxSize(ctx.size(&args[0])?)),
        ConstraintKind::OfSize => Check::Array(ArrayCheck::Size(ctx.size(&args[0])?)),
    };
    Ok(check)
}

fn compare(ctx: &ArgContext<'_>, op: Comparison, value: &Value) -> Result<Check, ConfigError> {
    Ok(Check::Number(NumberCheck::Compare(op, ctx.number(value)?)))
}

fn parse_pattern(ctx: &ArgContext<'_>, value: &Value) -> Result<Regex, ConfigError> {
    let pattern = value
        .as_str()
        .ok_or_else(|| ctx.invalid("a regular expression pattern string"))?;
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        field: ctx.field.to_string(),
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn parse_string_list(ctx: &ArgContext<'_>, value: &Value) -> Result<Vec<String>, ConfigError> {
    let items = value
        .as_array()
        .ok_or_else(|| ctx.invalid("an array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ctx.invalid("an array of strings"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(field_type: FieldType, name: &str) -> ArgContext<'static> {
        ArgContext {
            field: "f",
            field_type,
            spec: field_type.constraint(name).unwrap(),
        }
    }

    #[test]
    fn test_trim_flag_is_parsed() {
        let check = parse_check(&ctx(FieldType::String, "min"), &[json!(2), json!(true)]).unwrap();
        assert!(matches!(
            check,
            Check::String(StringCheck::MinLength { min: 2, trim: true })
        ));
        let check = parse_check(&ctx(FieldType::String, "max"), &[json!(5)]).unwrap();
        assert!(matches!(
            check,
            Check::String(StringCheck::MaxLength { max: 5, trim: false })
        ));
    }

    #[test]
    fn test_non_boolean_trim_flag_is_rejected() {
        let err = parse_check(&ctx(FieldType::String, "min"), &[json!(2), json!("yes")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidArgument { .. }));
    }

    #[test]
    fn test_negative_size_is_rejected() {
        let err = parse_check(&ctx(FieldType::Array, "ofSize"), &[json!(-1)]).unwrap_err();
        assert!(err.to_string().contains("non-negative integer"));
    }

    #[test]
    fn test_integral_float_sizes_are_accepted() {
        let check = parse_check(&ctx(FieldType::Array, "ofSize"), &[json!(2.0)]).unwrap();
        assert!(matches!(check, Check::Array(ArrayCheck::Size(2))));
        let check = parse_check(&ctx(FieldType::String, "min"), &[json!(3.0), json!(true)]).unwrap();
        assert!(matches!(
            check,
            Check::String(StringCheck::MinLength { min: 3, trim: true })
        ));

        for bad in [json!(2.5), json!(-2.0), json!("2")] {
            let err = parse_check(&ctx(FieldType::Array, "ofMinSize"), &[bad]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn test_bad_pattern() {
        let err = parse_check(&ctx(FieldType::String, "match"), &[json!("(unclosed")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_range_must_be_increasing() {
        let number = ctx(FieldType::Number, "btw");
        assert!(parse_check(&number, &[json!(0), json!(18)]).is_ok());
        assert!(matches!(
            parse_check(&number, &[json!(18), json!(0)]),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert!(matches!(
            parse_check(&number, &[json!(5), json!(5)]),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_enum_requires_strings() {
        let string = ctx(FieldType::String, "enum");
        assert!(parse_check(&string, &[json!(["M", "F"])]).is_ok());
        assert!(parse_check(&string, &[json!(["M", 1])]).is_err());
        assert!(parse_check(&string, &[json!("M")]).is_err());
    }
}
