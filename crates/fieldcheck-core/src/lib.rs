//! Fieldcheck Core - Declarative, schema-driven validation of JSON records
//!
//! A schema configuration describes, per field, a type and a set of named
//! constraints, each paired with the error message to report when it fails.
//! The configuration is compiled once into a [`Validator`], which can then be
//! applied to any number of records.
//!
//! # Main Components
//!
//! - **Registry**: the closed set of types and the constraints each type supports
//! - **Compiler**: checks a configuration against the registry and builds pipelines
//! - **Engine**: runs pipelines against records with first-failure-wins semantics
//! - **Batch**: validates many records with fail-fast and error-cap controls
//!
//! # Example
//!
//! ```rust
//! use fieldcheck_core::{create_validator, FieldError, SchemaConfig};
//! use serde_json::json;
//!
//! let config = SchemaConfig::from_value(json!({
//!     "name": {
//!         "type": ["string", "The name must be a string"],
//!         "required": ["The name is required"],
//!         "min": [2, "The name must consist of 2 characters minimum"]
//!     },
//!     "age": {
//!         "type": ["number", "The age must be a number"],
//!         "btw": [3, 5, "The age must be between 3 and 5"]
//!     }
//! }))
//! .unwrap();
//!
//! let validator = create_validator(&config).unwrap();
//! assert!(validator.validate(&json!({"name": "test", "age": 3})).is_empty());
//! assert_eq!(
//!     validator.validate(&json!({"age": 22})),
//!     vec![
//!         FieldError::new("name", "The name is required"),
//!         FieldError::new("age", "The age must be between 3 and 5"),
//!     ]
//! );
//! ```

pub mod batch;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod template;

// Re-export main types for convenience
pub use batch::{BatchReport, RecordReport, ValidationConfig, ValidationErrors};
pub use compiler::{compile_field, compile_schema, CompiledPipeline, CompiledSchema, Gate, GateOutcome, Verdict};
pub use config::{FieldConfig, SchemaConfig};
pub use engine::{FieldError, Validator};
pub use error::{ConfigError, Error, Result};
pub use registry::{ConstraintKind, ConstraintSpec, ElementType, FieldType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile a schema configuration into a validator
pub fn create_validator(config: &SchemaConfig) -> Result<Validator> {
    Validator::new(config)
}
