//! Shared utilities for command handlers

use crate::config::is_yaml;
use crate::error::{Error, ErrorContext, Result};
use fieldcheck_core::Validator;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read a JSON or YAML document, picking the parser from the file extension
pub async fn read_document(path: &Path) -> Result<Value> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = content.len(), "Read document");

    // The parser's message carries the line and column of the failure
    if is_yaml(path) {
        serde_yaml::from_str(&content).map_err(|e| invalid_format(path, "YAML", e.to_string()))
    } else {
        serde_json::from_str(&content).map_err(|e| invalid_format(path, "JSON", e.to_string()))
    }
}

fn invalid_format(path: &Path, expected: &str, reason: String) -> Error {
    Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: expected.to_string(),
        reason,
    }
}

/// Read and compile a schema file
pub async fn load_validator(path: &Path) -> Result<Validator> {
    let document = read_document(path).await?;
    Validator::from_value(document).map_err(|source| Error::Schema {
        path: path.to_path_buf(),
        source,
    })
}

/// Records held by an input document: one object, or an array of records
pub fn records_of(path: &Path, document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(records) => Ok(records),
        record @ Value::Object(_) => Ok(vec![record]),
        other => Err(invalid_format(
            path,
            "an object or an array of records",
            format!("found {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_read_yaml_and_json() {
        let yaml = write_temp(".yml", "name: Ada\nage: 36\n");
        assert_eq!(read_document(yaml.path()).await.unwrap(), json!({"name": "Ada", "age": 36}));

        let json = write_temp(".json", r#"[{"name": "Ada"}]"#);
        assert_eq!(read_document(json.path()).await.unwrap(), json!([{"name": "Ada"}]));
    }

    #[tokio::test]
    async fn test_read_errors() {
        let missing = read_document(Path::new("/nonexistent/records.json")).await;
        assert!(matches!(missing, Err(Error::FileNotFound { .. })));

        let broken = write_temp(".json", "{ not json");
        let err = read_document(broken.path()).await.unwrap_err();
        assert!(matches!(&err, Error::InvalidFormat { expected, .. } if expected == "JSON"));
        assert_eq!(err.exit_code(), 4);
        let text = err.to_string();
        assert!(text.contains("expected JSON"));
        assert!(text.contains("line 1 column 3"), "{text}");

        let broken = write_temp(".yaml", "name: [unclosed\n");
        let text = read_document(broken.path()).await.unwrap_err().to_string();
        assert!(text.contains("expected YAML"));
        assert!(text.contains("line "), "{text}");
    }

    #[tokio::test]
    async fn test_schema_errors_keep_the_path() {
        let schema = write_temp(".json", r#"{"age": {"type": ["integer", "Age must be a number"]}}"#);
        match load_validator(schema.path()).await {
            Err(Error::Schema { path, source }) => {
                assert_eq!(path, schema.path());
                assert_eq!(source.as_config().map(|e| e.field()), Some("age"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_records_of() {
        let path = Path::new("records.json");
        assert_eq!(records_of(path, json!({"a": 1})).unwrap().len(), 1);
        assert_eq!(records_of(path, json!([{"a": 1}, {"a": 2}])).unwrap().len(), 2);
        assert!(records_of(path, json!([])).unwrap().is_empty());
        let err = records_of(path, json!("record")).unwrap_err();
        assert!(err.to_string().ends_with("(found a string)"));
    }
}
