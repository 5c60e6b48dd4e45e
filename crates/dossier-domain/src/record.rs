//! The dossier record - the structured output for one source document

use serde_json::{Map, Value};

/// Top-level sections every dossier record must carry.
pub const RECORD_SECTIONS: [&str; 3] = ["meta", "entities", "connections"];

/// Meta fields every record must carry.
///
/// Deliberately a fixed constant rather than read from the schema file:
/// contributors supply the schema alongside their batches, and the
/// validation gate must not be weakenable by editing it. The schema's own
/// `required` list still drives the top-level key checks independently.
pub const REQUIRED_META_FIELDS: [&str; 5] =
    ["doc_date", "doc_type", "subject", "confidence", "processed_by"];

/// A dossier record as returned by an LLM provider.
///
/// Records are kept as dynamic JSON rather than a rigid struct: the
/// validators perform presence-only checks and must be able to describe
/// exactly what is missing from a malformed record instead of failing at
/// deserialization time. Accessors return `None` when a section is absent
/// or has the wrong shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DossierRecord(Value);

impl DossierRecord {
    /// Wrap an already-parsed JSON value.
    ///
    /// Any value is accepted; structural problems are reported by the
    /// validators, not here.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parse raw provider output as JSON.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self(serde_json::from_str(raw)?))
    }

    /// The underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The `meta` section, if present and an object.
    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.0.get("meta")?.as_object()
    }

    /// The `entities` section, if present and an array.
    pub fn entities(&self) -> Option<&Vec<Value>> {
        self.0.get("entities")?.as_array()
    }

    /// The `connections` section, if present and an array.
    pub fn connections(&self) -> Option<&Vec<Value>> {
        self.0.get("connections")?.as_array()
    }

    /// Whether the record has the given top-level key.
    pub fn has_section(&self, key: &str) -> bool {
        self.0.get(key).is_some()
    }

    /// Stamp the record with run provenance: the contributor handle and
    /// the model that produced it.
    ///
    /// A no-op when `meta` is absent or not an object - such a record is
    /// rejected by structural validation anyway, and inserting a fresh
    /// `meta` here would mask that violation.
    pub fn inject_provenance(&mut self, processed_by: &str, model: &str) {
        if let Some(meta) = self.0.get_mut("meta").and_then(Value::as_object_mut) {
            meta.insert("processed_by".to_string(), Value::String(processed_by.to_string()));
            meta.insert("model".to_string(), Value::String(model.to_string()));
        }
    }

    /// Serialize the record as pretty-printed JSON for persistence.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_json() {
        let record = DossierRecord::parse(r#"{"meta": {}, "entities": [], "connections": []}"#);
        assert!(record.is_ok());
    }

    #[test]
    fn test_parse_invalid_json() {
        let record = DossierRecord::parse("not json at all");
        assert!(record.is_err());
    }

    #[test]
    fn test_section_accessors() {
        let record = DossierRecord::from_value(json!({
            "meta": {"subject": "test"},
            "entities": [{"id": "e1"}],
            "connections": []
        }));

        assert_eq!(record.meta().unwrap().get("subject").unwrap(), "test");
        assert_eq!(record.entities().unwrap().len(), 1);
        assert!(record.connections().unwrap().is_empty());
        assert!(record.has_section("meta"));
        assert!(!record.has_section("extra"));
    }

    #[test]
    fn test_accessors_tolerate_wrong_shapes() {
        let record = DossierRecord::from_value(json!({
            "meta": "not an object",
            "entities": 42
        }));

        assert!(record.meta().is_none());
        assert!(record.entities().is_none());
        assert!(record.connections().is_none());
    }

    #[test]
    fn test_inject_provenance() {
        let mut record = DossierRecord::from_value(json!({
            "meta": {"subject": "test"},
            "entities": [],
            "connections": []
        }));

        record.inject_provenance("alice", "gemini-2.0-flash");

        let meta = record.meta().unwrap();
        assert_eq!(meta.get("processed_by").unwrap(), "alice");
        assert_eq!(meta.get("model").unwrap(), "gemini-2.0-flash");
        // Existing fields survive
        assert_eq!(meta.get("subject").unwrap(), "test");
    }

    #[test]
    fn test_inject_provenance_without_meta_is_noop() {
        let mut record = DossierRecord::from_value(json!({"entities": []}));
        record.inject_provenance("alice", "gpt-4o");
        assert!(record.meta().is_none());
    }

    #[test]
    fn test_pretty_json_round_trip() {
        let record = DossierRecord::from_value(json!({"meta": {}, "entities": [], "connections": []}));
        let pretty = record.to_pretty_json().unwrap();
        let reparsed = DossierRecord::parse(&pretty).unwrap();
        assert_eq!(reparsed, record);
    }
}
