//! Compiled pipeline representation
//!
//! A compiled field is a gate followed by the type check and the remaining
//! constraints in declaration order. Every argument is already parsed into a
//! typed value, so running a step never fails; it only passes or yields the
//! step's message.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use crate::registry::predicates::{array, general, number, string};
use crate::registry::{ElementType, FieldType};
use regex::Regex;
use serde_json::Value;

/// Result of running one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    Pass,
    /// The step failed; carries its untemplated message
    Fail(&'a str),
}

impl Verdict<'_> {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Step zero of every pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Required { message: String },
    Optional,
}

/// What the gate decided for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome<'a> {
    /// The field is required; the verdict says whether it is defined
    Required(Verdict<'a>),
    /// Optional and absent or null: nothing else runs
    Optional,
    /// Optional but present: continue with the type check
    OptionalPresent,
}

impl Gate {
    pub fn evaluate(&self, candidate: Option<&Value>) -> GateOutcome<'_> {
        match self {
            Gate::Required { message } => {
                if general::is_defined(candidate) {
                    GateOutcome::Required(Verdict::Pass)
                } else {
                    GateOutcome::Required(Verdict::Fail(message))
                }
            }
            Gate::Optional if general::is_absent(candidate) => GateOutcome::Optional,
            Gate::Optional => GateOutcome::OptionalPresent,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Gate::Required { .. })
    }
}

/// Numeric comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Le,
    Ge,
    Eq,
    Gt,
    Lt,
}

#[derive(Debug, Clone)]
pub enum StringCheck {
    MinLength { min: usize, trim: bool },
    MaxLength { max: usize, trim: bool },
    Match(Regex),
    Enum(Vec<String>),
    Email,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberCheck {
    Integer,
    Compare(Comparison, f64),
    Between { lower: f64, upper: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayCheck {
    OfType(ElementType),
    MinSize(usize),
    MaxSize(usize),
    Size(usize),
}

/// A fully parsed check
#[derive(Debug, Clone)]
pub enum Check {
    Type(FieldType),
    String(StringCheck),
    Number(NumberCheck),
    Array(ArrayCheck),
}

impl Check {
    /// Evaluate against a present candidate.
    /// A candidate of the wrong shape fails instead of panicking.
    pub fn passes(&self, value: &Value) -> bool {
        match self {
            Check::Type(field_type) => field_type.matches(value),
            Check::String(check) => match value.as_str() {
                Some(text) => check.passes(text),
                None => false,
            },
            Check::Number(check) => check.passes(value),
            Check::Array(check) => match value.as_array() {
                Some(items) => check.passes(items),
                None => false,
            },
        }
    }
}

impl StringCheck {
    fn passes(&self, text: &str) -> bool {
        match self {
            StringCheck::MinLength { min, trim } => string::has_min_length(text, *min, *trim),
            StringCheck::MaxLength { max, trim } => string::has_max_length(text, *max, *trim),
            StringCheck::Match(pattern) => string::has_match(text, pattern),
            StringCheck::Enum(allowed) => string::is_enum_of(text, allowed),
            StringCheck::Email => string::is_email(text),
        }
    }
}

impl NumberCheck {
    fn passes(&self, value: &Value) -> bool {
        match self {
            NumberCheck::Integer => number::is_integer(value),
            NumberCheck::Compare(op, bound) => match op {
                Comparison::Le => number::is_lower_or_equal(value, *bound),
                Comparison::Ge => number::is_greater_or_equal(value, *bound),
                Comparison::Eq => number::is_equal(value, *bound),
                Comparison::Gt => number::is_greater_than(value, *bound),
                Comparison::Lt => number::is_lower_than(value, *bound),
            },
            NumberCheck::Between { lower, upper } => number::is_between(value, *lower, *upper),
        }
    }
}

impl ArrayCheck {
    fn passes(&self, items: &[Value]) -> bool {
        match self {
            ArrayCheck::OfType(element_type) => array::is_of_type(items, *element_type),
            ArrayCheck::MinSize(min) => array::has_min_size(items, *min),
            ArrayCheck::MaxSize(max) => array::has_max_size(items, *max),
            ArrayCheck::Size(size) => array::has_size(items, *size),
        }
    }
}

/// One executable step: a check plus the message reported when it fails
#[derive(Debug, Clone)]
pub struct Step {
    constraint: String,
    check: Check,
    message: String,
}

impl Step {
    pub fn new(constraint: impl Into<String>, check: Check, message: impl Into<String>) -> Self {
        Self {
            constraint: constraint.into(),
            check,
            message: message.into(),
        }
    }

    /// Configuration key this step was compiled from
    pub fn constraint(&self) -> &str {
        &self.constraint
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn run(&self, value: &Value) -> Verdict<'_> {
        if self.check.passes(value) {
            Verdict::Pass
        } else {
            Verdict::Fail(&self.message)
        }
    }
}

/// Executable pipeline of a single field
#[derive(Debug, Clone)]
pub struct CompiledPipeline {
    gate: Gate,
    field_type: FieldType,
    /// Type check first, then constraints in declaration order
    steps: Vec<Step>,
}

impl CompiledPipeline {
    pub(crate) fn new(gate: Gate, field_type: FieldType, steps: Vec<Step>) -> Self {
        Self {
            gate,
            field_type,
            steps,
        }
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_required(&self) -> bool {
        self.gate.is_required()
    }

    /// Number of steps, gate included
    pub fn step_count(&self) -> usize {
        self.steps.len() + 1
    }

    /// Step names in execution order, starting with the gate
    pub fn step_names(&self) -> Vec<&str> {
        let gate = if self.is_required() { "required" } else { "optional" };
        std::iter::once(gate)
            .chain(self.steps.iter().map(Step::constraint))
            .collect()
    }

    /// Run the pipeline; returns the untemplated message of the first failing step
    pub fn run<'a>(&'a self, candidate: Option<&Value>) -> Option<&'a str> {
        let value = match self.gate.evaluate(candidate) {
            GateOutcome::Optional => return None,
            GateOutcome::Required(Verdict::Fail(message)) => return Some(message),
            GateOutcome::Required(Verdict::Pass) | GateOutcome::OptionalPresent => candidate?,
        };

        self.steps.iter().find_map(|step| match step.run(value) {
            Verdict::Pass => None,
            Verdict::Fail(message) => Some(message),
        })
    }
}

/// Compiled pipelines of every schema field, in declaration order
#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    fields: Vec<(String, CompiledPipeline)>,
}

impl CompiledSchema {
    pub(crate) fn new(fields: Vec<(String, CompiledPipeline)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&CompiledPipeline> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, pipeline)| pipeline)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &CompiledPipeline)> {
        self.fields
            .iter()
            .map(|(name, pipeline)| (name.as_str(), pipeline))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sex_pipeline() -> CompiledPipeline {
        CompiledPipeline::new(
            Gate::Required {
                message: "T2".to_string(),
            },
            FieldType::String,
            vec![
                Step::new("type", Check::Type(FieldType::String), "T1"),
                Step::new(
                    "enum",
                    Check::String(StringCheck::Enum(vec!["male".into(), "female".into()])),
                    "T3",
                ),
                Step::new("max", Check::String(StringCheck::MaxLength { max: 3, trim: false }), "T4"),
            ],
        )
    }

    #[test]
    fn test_gate_outcomes() {
        let required = Gate::Required {
            message: "needed".to_string(),
        };
        assert_eq!(required.evaluate(None), GateOutcome::Required(Verdict::Fail("needed")));
        assert_eq!(
            required.evaluate(Some(&json!(" x "))),
            GateOutcome::Required(Verdict::Pass)
        );
        assert_eq!(Gate::Optional.evaluate(None), GateOutcome::Optional);
        assert_eq!(Gate::Optional.evaluate(Some(&json!(null))), GateOutcome::Optional);
        assert_eq!(Gate::Optional.evaluate(Some(&json!(""))), GateOutcome::OptionalPresent);
    }

    #[test]
    fn test_first_failure_wins() {
        let pipeline = sex_pipeline();
        assert_eq!(pipeline.run(None), Some("T2"));
        assert_eq!(pipeline.run(Some(&json!(2))), Some("T1"));
        assert_eq!(pipeline.run(Some(&json!("M"))), Some("T3"));
        assert_eq!(pipeline.run(Some(&json!("male"))), Some("T4"));
    }

    #[test]
    fn test_step_names() {
        let pipeline = sex_pipeline();
        assert_eq!(pipeline.step_names(), vec!["required", "type", "enum", "max"]);
        assert_eq!(pipeline.step_count(), 4);
        assert_eq!(pipeline.step_count(), pipeline.step_names().len());
        assert!(pipeline.is_required());
    }

    #[test]
    fn test_gate_only_pipeline_counts_one_step() {
        let pipeline = CompiledPipeline::new(Gate::Optional, FieldType::Boolean, Vec::new());
        assert_eq!(pipeline.step_count(), 1);
        assert_eq!(pipeline.step_names(), vec!["optional"]);
    }

    #[test]
    fn test_wrong_shape_fails_without_panicking() {
        let check = Check::Array(ArrayCheck::MinSize(1));
        assert!(!check.passes(&json!("not an array")));
        let check = Check::String(StringCheck::Email);
        assert!(!check.passes(&json!(12)));
        let check = Check::Number(NumberCheck::Compare(Comparison::Gt, 1.0));
        assert!(!check.passes(&json!({})));
    }
}
