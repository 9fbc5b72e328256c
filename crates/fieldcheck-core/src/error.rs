//! Error types for the fieldcheck engine
//!
//! Only schema construction can fail. Every way a schema configuration can be
//! malformed has its own [`ConfigError`] variant, and each message names the
//! offending field and, where useful, the valid alternatives. Validation of
//! input records never fails; it reports [`crate::FieldError`] values instead.
//!
//! Copyright (c) 2025 Fieldcheck Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for fieldcheck operations
#[derive(Error, Debug)]
pub enum Error {
    /// The schema configuration is malformed
    #[error("Invalid schema configuration: {0}")]
    Config(#[from] ConfigError),

    /// The schema document could not be parsed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Wrap a serde_json error with a short description of what was being parsed
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: format!("{}: {}", message.into(), source),
            source,
        }
    }

    /// The configuration error behind this error, if any
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(err) => Some(err),
            Self::Json { .. } => None,
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A schema configuration mistake, detected while compiling a field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("type not specified for field `{field}`; must be one of the registered types: {valid}")]
    TypeNotSpecified { field: String, valid: String },

    #[error("`{type_name}` is not a registered type (field `{field}`); valid types are: {valid}")]
    UnknownType {
        field: String,
        type_name: String,
        valid: String,
    },

    #[error("a message is required for the type check (field `{field}`)")]
    MissingTypeMessage { field: String },

    #[error("a message is required for the required check (field `{field}`)")]
    MissingRequiredMessage { field: String },

    #[error("`{key}` is a reserved key and cannot be configured (field `{field}`); omit `required` to make a field optional")]
    ReservedKey { field: String, key: String },

    #[error("`{constraint}` is not a constraint of type `{field_type}` (field `{field}`); valid constraints are: {valid}")]
    UnknownConstraint {
        field: String,
        constraint: String,
        field_type: String,
        valid: String,
    },

    #[error("invalid argument count for constraint `{constraint}` of type `{field_type}` (field `{field}`); expected {expected} argument(s), found {found}")]
    ArgumentCount {
        field: String,
        constraint: String,
        field_type: String,
        expected: String,
        found: usize,
    },

    #[error("message must be a string (constraint `{constraint}` of field `{field}`)")]
    MessageNotString { field: String, constraint: String },

    #[error("invalid argument for constraint `{constraint}` of type `{field_type}` (field `{field}`); expected {expected}")]
    InvalidArgument {
        field: String,
        constraint: String,
        field_type: String,
        expected: &'static str,
    },

    #[error("invalid pattern `{pattern}` for constraint `match` (field `{field}`): {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("for range constraint `{constraint}` (field `{field}`), the lower bound {lower} must be lower than the upper bound {upper}")]
    InvalidRange {
        field: String,
        constraint: String,
        lower: f64,
        upper: f64,
    },
}

impl ConfigError {
    /// Name of the field whose configuration is wrong
    pub fn field(&self) -> &str {
        match self {
            Self::TypeNotSpecified { field, .. }
            | Self::UnknownType { field, .. }
            | Self::MissingTypeMessage { field }
            | Self::MissingRequiredMessage { field }
            | Self::ReservedKey { field, .. }
            | Self::UnknownConstraint { field, .. }
            | Self::ArgumentCount { field, .. }
            | Self::MessageNotString { field, .. }
            | Self::InvalidArgument { field, .. }
            | Self::InvalidPattern { field, .. }
            | Self::InvalidRange { field, .. } => field,
        }
    }
}
