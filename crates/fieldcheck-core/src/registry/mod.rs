//! Predicate registry
//!
//! The set of supported field types and, per type, the named constraints that
//! can be configured on it. The registry is closed: types and constraints are
//! enumerations resolved through static tables, and every constraint carries
//! explicit arity metadata used by the compiler.
//!
//! - `predicates`: the pure check functions behind each constraint
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

pub mod predicates;

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Declared type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Boolean,
    Number,
    Array,
    Object,
}

impl FieldType {
    /// Every registered type, in registry order
    pub const ALL: [FieldType; 5] = [
        FieldType::String,
        FieldType::Boolean,
        FieldType::Number,
        FieldType::Array,
        FieldType::Object,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Number => "number",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Constraints that may be configured on a field of this type
    pub fn constraints(self) -> &'static [ConstraintSpec] {
        match self {
            FieldType::String => &STRING_CONSTRAINTS,
            FieldType::Number => &NUMBER_CONSTRAINTS,
            FieldType::Array => &ARRAY_CONSTRAINTS,
            FieldType::Boolean | FieldType::Object => &[],
        }
    }

    /// Look up a constraint of this type by its configuration key
    pub fn constraint(self, name: &str) -> Option<&'static ConstraintSpec> {
        self.constraints().iter().find(|spec| spec.name == name)
    }

    /// The type check itself
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => predicates::string::is_string(value),
            FieldType::Boolean => predicates::general::is_boolean(value),
            FieldType::Number => predicates::number::is_number(value),
            FieldType::Array => predicates::array::is_array(value),
            FieldType::Object => predicates::general::is_object(value),
        }
    }

    /// Registered type names, formatted for error messages
    pub fn valid_names() -> String {
        quote_list(Self::ALL.iter().map(|t| t.name()))
    }

    /// Constraint names of this type, formatted for error messages
    pub fn valid_constraint_names(self) -> String {
        if self.constraints().is_empty() {
            return format!("none (type `{}` only supports `type` and `required`)", self);
        }
        quote_list(self.constraints().iter().map(|spec| spec.name))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of a constraint, independent of its configuration key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    MinLength,
    MaxLength,
    Match,
    Enum,
    Email,
    Integer,
    LowerOrEqual,
    GreaterOrEqual,
    Equal,
    GreaterThan,
    LowerThan,
    Between,
    OfType,
    OfMinSize,
    OfMaxSize,
    OfSize,
}

/// Registry metadata for one constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstraintSpec {
    /// Configuration key
    pub name: &'static str,
    #[serde(skip)]
    pub kind: ConstraintKind,
    /// Positional arguments expected before the message
    pub arg_count: usize,
    /// Whether one extra boolean flag may follow the positional arguments
    pub allows_trailing_flag: bool,
    /// Short human description
    pub summary: &'static str,
}

impl ConstraintSpec {
    const fn new(name: &'static str, kind: ConstraintKind, arg_count: usize, summary: &'static str) -> Self {
        Self {
            name,
            kind,
            arg_count,
            allows_trailing_flag: false,
            summary,
        }
    }

    const fn with_trailing_flag(mut self) -> Self {
        self.allows_trailing_flag = true;
        self
    }

    /// Whether `count` positional arguments (message excluded) are acceptable
    pub fn accepts_arg_count(&self, count: usize) -> bool {
        count == self.arg_count || (self.allows_trailing_flag && count == self.arg_count + 1)
    }

    /// Expected length of the argument list, message included
    pub fn expected_list_len(&self) -> String {
        if self.allows_trailing_flag {
            format!("{} or {}", self.arg_count + 1, self.arg_count + 2)
        } else {
            (self.arg_count + 1).to_string()
        }
    }
}

static STRING_CONSTRAINTS: [ConstraintSpec; 5] = [
    ConstraintSpec::new("min", ConstraintKind::MinLength, 1, "length is at least N characters (optional trim flag)")
        .with_trailing_flag(),
    ConstraintSpec::new("max", ConstraintKind::MaxLength, 1, "length is at most N characters (optional trim flag)")
        .with_trailing_flag(),
    ConstraintSpec::new("match", ConstraintKind::Match, 1, "matches a regular expression"),
    ConstraintSpec::new("enum", ConstraintKind::Enum, 1, "is one of a list of strings"),
    ConstraintSpec::new("email", ConstraintKind::Email, 0, "is an e-mail address"),
];

static NUMBER_CONSTRAINTS: [ConstraintSpec; 7] = [
    ConstraintSpec::new("integer", ConstraintKind::Integer, 0, "is an integer"),
    ConstraintSpec::new("le", ConstraintKind::LowerOrEqual, 1, "is lower than or equal to N"),
    ConstraintSpec::new("ge", ConstraintKind::GreaterOrEqual, 1, "is greater than or equal to N"),
    ConstraintSpec::new("eq", ConstraintKind::Equal, 1, "is equal to N"),
    ConstraintSpec::new("gt", ConstraintKind::GreaterThan, 1, "is greater than N"),
    ConstraintSpec::new("lt", ConstraintKind::LowerThan, 1, "is lower than N"),
    ConstraintSpec::new("btw", ConstraintKind::Between, 2, "is between two bounds, inclusive"),
];

static ARRAY_CONSTRAINTS: [ConstraintSpec; 4] = [
    ConstraintSpec::new("ofType", ConstraintKind::OfType, 1, "every element has the given type"),
    ConstraintSpec::new("ofMinSize", ConstraintKind::OfMinSize, 1, "has at least N elements"),
    ConstraintSpec::new("ofMaxSize", ConstraintKind::OfMaxSize, 1, "has at most N elements"),
    ConstraintSpec::new("ofSize", ConstraintKind::OfSize, 1, "has exactly N elements"),
];

/// Element types accepted by the array `ofType` constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    String,
    Number,
    Boolean,
    Object,
}

impl ElementType {
    pub const ALL: [ElementType; 4] = [
        ElementType::String,
        ElementType::Number,
        ElementType::Boolean,
        ElementType::Object,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementType::String => "string",
            ElementType::Number => "number",
            ElementType::Boolean => "boolean",
            ElementType::Object => "object",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether an array element has this type. Numeric strings are not numbers here.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            ElementType::String => value.is_string(),
            ElementType::Number => value.is_number(),
            ElementType::Boolean => value.is_boolean(),
            ElementType::Object => value.is_object(),
        }
    }
}

fn quote_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(" | ")
}
