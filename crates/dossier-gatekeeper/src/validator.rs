//! Record validation logic

use dossier_domain::{DossierRecord, SchemaDefinition, RECORD_SECTIONS, REQUIRED_META_FIELDS};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// A connection endpoint field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The `from` side of a connection
    From,
    /// The `to` side of a connection
    To,
}

impl Endpoint {
    /// The JSON field name for this endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::From => "from",
            Endpoint::To => "to",
        }
    }
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Required top-level section is absent
    MissingSection(String),

    /// Required meta field is absent
    MissingMetaField(String),

    /// Section is present but has the wrong shape (meta not an object,
    /// entities/connections not arrays)
    MalformedSection {
        /// Section name
        name: String,
    },

    /// Entity is not an object with a string `id`
    MalformedEntity {
        /// Index within the entities array
        index: usize,
    },

    /// Connection lacks a string endpoint field
    MalformedConnection {
        /// Index within the connections array
        index: usize,
        /// Which endpoint is missing
        field: Endpoint,
    },

    /// Connection endpoint references an id absent from the entities
    DanglingEndpoint {
        /// Index within the connections array
        index: usize,
        /// Which endpoint dangles
        field: Endpoint,
        /// The unresolved identifier
        id: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingSection(name) => write!(f, "Missing '{}' block", name),
            Violation::MissingMetaField(field) => write!(f, "Missing meta field: {}", field),
            Violation::MalformedSection { name } => {
                write!(f, "Section '{}' has the wrong shape", name)
            }
            Violation::MalformedEntity { index } => {
                write!(f, "Entity {}: missing string 'id'", index)
            }
            Violation::MalformedConnection { index, field } => {
                write!(f, "Connection {}: missing string '{}'", index, field.as_str())
            }
            Violation::DanglingEndpoint { index, field, id } => {
                write!(
                    f,
                    "Connection {}: '{}' ID '{}' not found in entities",
                    index,
                    field.as_str(),
                    id
                )
            }
        }
    }
}

/// Outcome of running both validation stages over one record.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Violations from the structural stage
    pub structural: Vec<Violation>,

    /// Violations from the graph stage
    pub graph: Vec<Violation>,
}

impl ValidationReport {
    /// Whether the record passed both stages.
    pub fn passed(&self) -> bool {
        self.structural.is_empty() && self.graph.is_empty()
    }

    /// All violations from both stages, structural first.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.structural.iter().chain(self.graph.iter())
    }
}

/// The Gatekeeper validates records against a loaded schema definition.
pub struct Gatekeeper {
    schema: SchemaDefinition,
}

impl Gatekeeper {
    /// Create a Gatekeeper for the given schema definition.
    pub fn new(schema: SchemaDefinition) -> Self {
        Self { schema }
    }

    /// The schema this gatekeeper validates against.
    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// Run both stages over a record.
    ///
    /// The graph stage runs even when the structural stage fails, so a
    /// single report names everything wrong with the record. The verdict
    /// is unchanged either way: any violation fails the record.
    pub fn validate(&self, record: &DossierRecord) -> ValidationReport {
        ValidationReport {
            structural: check_structure(record, &self.schema),
            graph: check_graph(record),
        }
    }
}

/// Structural stage: presence of required top-level keys and meta fields.
///
/// Top-level keys come from the schema's `required` list plus the fixed
/// section names; the meta-field list is the fixed
/// [`REQUIRED_META_FIELDS`] constant, deliberately not schema-driven.
pub fn check_structure(record: &DossierRecord, schema: &SchemaDefinition) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut required: Vec<&str> = schema.required_keys();
    for section in RECORD_SECTIONS {
        if !required.contains(&section) {
            required.push(section);
        }
    }

    for key in required {
        if !record.has_section(key) {
            violations.push(Violation::MissingSection(key.to_string()));
        }
    }

    if record.has_section("meta") {
        match record.meta() {
            Some(meta) => {
                for field in REQUIRED_META_FIELDS {
                    if !meta.contains_key(field) {
                        violations.push(Violation::MissingMetaField(field.to_string()));
                    }
                }
            }
            None => violations.push(Violation::MalformedSection {
                name: "meta".to_string(),
            }),
        }
    }

    violations
}

/// Graph stage: every connection endpoint must reference an entity id
/// present in the same record.
///
/// Absent sections are treated as empty (the structural stage already
/// reports them). Duplicate ids, self-loops, and duplicate connections are
/// deliberately not checked.
pub fn check_graph(record: &DossierRecord) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (name, ok) in [
        ("entities", record.entities().is_some()),
        ("connections", record.connections().is_some()),
    ] {
        if record.has_section(name) && !ok {
            violations.push(Violation::MalformedSection {
                name: name.to_string(),
            });
        }
    }

    let mut entity_ids: HashSet<&str> = HashSet::new();
    if let Some(entities) = record.entities() {
        for (index, entity) in entities.iter().enumerate() {
            match entity.get("id").and_then(Value::as_str) {
                Some(id) => {
                    entity_ids.insert(id);
                }
                None => violations.push(Violation::MalformedEntity { index }),
            }
        }
    }

    if let Some(connections) = record.connections() {
        for (index, connection) in connections.iter().enumerate() {
            for field in [Endpoint::From, Endpoint::To] {
                match connection.get(field.as_str()).and_then(Value::as_str) {
                    Some(id) if entity_ids.contains(id) => {}
                    Some(id) => violations.push(Violation::DanglingEndpoint {
                        index,
                        field,
                        id: id.to_string(),
                    }),
                    None => violations.push(Violation::MalformedConnection { index, field }),
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> SchemaDefinition {
        SchemaDefinition::from_value(json!({
            "required": ["meta", "entities", "connections"]
        }))
    }

    fn complete_record() -> DossierRecord {
        DossierRecord::from_value(json!({
            "meta": {
                "doc_date": "1975-03-12",
                "doc_type": "memo",
                "subject": "quarterly summary",
                "confidence": 0.9,
                "processed_by": "alice"
            },
            "entities": [{"id": "A", "name": "Arthur"}, {"id": "B", "name": "Beryl"}],
            "connections": [{"from": "A", "to": "B", "type": "reports_to"}]
        }))
    }

    #[test]
    fn test_complete_record_passes() {
        let report = Gatekeeper::new(schema()).validate(&complete_record());
        assert!(report.passed());
        assert_eq!(report.violations().count(), 0);
    }

    #[test]
    fn test_extraneous_fields_are_ignored() {
        let mut value = complete_record().as_value().clone();
        value["annotations"] = json!(["unexpected"]);
        value["meta"]["reviewer"] = json!("bob");

        let report = Gatekeeper::new(schema()).validate(&DossierRecord::from_value(value));
        assert!(report.passed());
    }

    #[test]
    fn test_missing_sections_named_individually() {
        let record = DossierRecord::from_value(json!({"entities": []}));
        let violations = check_structure(&record, &schema());

        assert!(violations.contains(&Violation::MissingSection("meta".to_string())));
        assert!(violations.contains(&Violation::MissingSection("connections".to_string())));
        assert!(!violations.contains(&Violation::MissingSection("entities".to_string())));
    }

    #[test]
    fn test_missing_meta_field_named() {
        let record = DossierRecord::from_value(json!({
            "meta": {
                "doc_date": "1975-03-12",
                "doc_type": "memo",
                "subject": "x",
                "confidence": 0.5
            },
            "entities": [],
            "connections": []
        }));

        let violations = check_structure(&record, &schema());
        assert_eq!(
            violations,
            vec![Violation::MissingMetaField("processed_by".to_string())]
        );
    }

    #[test]
    fn test_each_meta_field_required() {
        for dropped in REQUIRED_META_FIELDS {
            let mut value = complete_record().as_value().clone();
            value["meta"].as_object_mut().unwrap().remove(dropped);

            let violations = check_structure(&DossierRecord::from_value(value), &schema());
            assert_eq!(
                violations,
                vec![Violation::MissingMetaField(dropped.to_string())],
                "dropping '{}' should be the one reported violation",
                dropped
            );
        }
    }

    #[test]
    fn test_non_object_record_reports_all_sections() {
        let record = DossierRecord::from_value(json!([1, 2, 3]));
        let violations = check_structure(&record, &schema());
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_meta_wrong_shape() {
        let record = DossierRecord::from_value(json!({
            "meta": "not an object",
            "entities": [],
            "connections": []
        }));

        let violations = check_structure(&record, &schema());
        assert_eq!(
            violations,
            vec![Violation::MalformedSection { name: "meta".to_string() }]
        );
    }

    #[test]
    fn test_schema_required_drives_extra_keys() {
        let schema = SchemaDefinition::from_value(json!({
            "required": ["meta", "entities", "connections", "sources"]
        }));

        let violations = check_structure(&complete_record(), &schema);
        assert_eq!(
            violations,
            vec![Violation::MissingSection("sources".to_string())]
        );
    }

    #[test]
    fn test_graph_referential_integrity_passes() {
        let record = DossierRecord::from_value(json!({
            "entities": [{"id": "A"}, {"id": "B"}],
            "connections": [{"from": "A", "to": "B"}]
        }));
        assert!(check_graph(&record).is_empty());
    }

    #[test]
    fn test_dangling_endpoint_names_index_and_id() {
        let record = DossierRecord::from_value(json!({
            "entities": [{"id": "A"}],
            "connections": [{"from": "A", "to": "C"}]
        }));

        let violations = check_graph(&record);
        assert_eq!(
            violations,
            vec![Violation::DanglingEndpoint {
                index: 0,
                field: Endpoint::To,
                id: "C".to_string()
            }]
        );
        assert_eq!(
            violations[0].to_string(),
            "Connection 0: 'to' ID 'C' not found in entities"
        );
    }

    #[test]
    fn test_both_endpoints_checked() {
        let record = DossierRecord::from_value(json!({
            "entities": [{"id": "B"}],
            "connections": [{"from": "X", "to": "Y"}, {"from": "B", "to": "B"}]
        }));

        let violations = check_graph(&record);
        assert_eq!(violations.len(), 2);
        // Self-loops are deliberately not flagged
        assert!(violations.iter().all(|v| matches!(
            v,
            Violation::DanglingEndpoint { index: 0, .. }
        )));
    }

    #[test]
    fn test_connection_missing_endpoint_field() {
        let record = DossierRecord::from_value(json!({
            "entities": [{"id": "A"}],
            "connections": [{"from": "A"}]
        }));

        let violations = check_graph(&record);
        assert_eq!(
            violations,
            vec![Violation::MalformedConnection {
                index: 0,
                field: Endpoint::To
            }]
        );
    }

    #[test]
    fn test_entity_without_id_flagged() {
        let record = DossierRecord::from_value(json!({
            "entities": [{"name": "no id"}, {"id": "A"}],
            "connections": []
        }));

        let violations = check_graph(&record);
        assert_eq!(violations, vec![Violation::MalformedEntity { index: 0 }]);
    }

    #[test]
    fn test_absent_sections_treated_as_empty() {
        let record = DossierRecord::from_value(json!({"meta": {}}));
        assert!(check_graph(&record).is_empty());
    }

    #[test]
    fn test_duplicate_entity_ids_not_flagged() {
        let record = DossierRecord::from_value(json!({
            "entities": [{"id": "A"}, {"id": "A"}],
            "connections": [{"from": "A", "to": "A"}]
        }));
        assert!(check_graph(&record).is_empty());
    }
}
