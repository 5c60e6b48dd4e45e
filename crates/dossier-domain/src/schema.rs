//! The externally supplied schema definition
//!
//! Loaded once per run and immutable thereafter. Two consumers: the
//! structural validator reads the top-level `required` list, and the
//! prompt builder embeds the whole definition into the extraction prompt.

use serde_json::Value;
use std::path::Path;
use thiserror::Error;

/// Errors while loading a schema definition
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Schema file could not be read
    #[error("Failed to read schema file: {0}")]
    Io(#[from] std::io::Error),

    /// Schema file is not valid JSON
    #[error("Schema file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A loaded schema definition.
#[derive(Debug, Clone)]
pub struct SchemaDefinition {
    value: Value,
}

impl SchemaDefinition {
    /// Load a schema definition from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self {
            value: serde_json::from_str(&contents)?,
        })
    }

    /// Build a schema definition from an in-memory value.
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// The top-level `required` key list, empty when the schema does not
    /// declare one.
    pub fn required_keys(&self) -> Vec<&str> {
        self.value
            .get("required")
            .and_then(Value::as_array)
            .map(|keys| keys.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// The full schema value, for prompt embedding.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Pretty-printed JSON of the full definition.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_keys() {
        let schema = SchemaDefinition::from_value(json!({
            "required": ["meta", "entities", "connections"]
        }));
        assert_eq!(schema.required_keys(), vec!["meta", "entities", "connections"]);
    }

    #[test]
    fn test_required_keys_absent() {
        let schema = SchemaDefinition::from_value(json!({"properties": {}}));
        assert!(schema.required_keys().is_empty());
    }

    #[test]
    fn test_required_keys_skips_non_strings() {
        let schema = SchemaDefinition::from_value(json!({"required": ["meta", 3, null]}));
        assert_eq!(schema.required_keys(), vec!["meta"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = SchemaDefinition::load("/nonexistent/schema.json");
        assert!(matches!(result, Err(SchemaError::Io(_))));
    }
}
