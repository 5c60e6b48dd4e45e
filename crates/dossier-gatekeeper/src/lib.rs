//! Dossier Gatekeeper
//!
//! Validates dossier records before they are accepted, in two stages:
//!
//! - **Structural**: presence of the required top-level sections (driven by
//!   the schema's `required` list plus the fixed section names) and of the
//!   fixed required meta fields. Presence-only; no type or range checks.
//! - **Graph**: referential integrity - every connection's `from` and `to`
//!   must name an entity id present in the same record. No duplicate-id,
//!   self-loop, or cycle analysis.
//!
//! # Examples
//!
//! ```
//! use dossier_domain::{DossierRecord, SchemaDefinition};
//! use dossier_gatekeeper::Gatekeeper;
//! use serde_json::json;
//!
//! let schema = SchemaDefinition::from_value(json!({
//!     "required": ["meta", "entities", "connections"]
//! }));
//! let gatekeeper = Gatekeeper::new(schema);
//!
//! let record = DossierRecord::from_value(json!({
//!     "meta": {
//!         "doc_date": "1975-03-12", "doc_type": "memo", "subject": "test",
//!         "confidence": 0.9, "processed_by": "alice"
//!     },
//!     "entities": [{"id": "A"}, {"id": "B"}],
//!     "connections": [{"from": "A", "to": "B"}]
//! }));
//!
//! assert!(gatekeeper.validate(&record).passed());
//! ```

#![warn(missing_docs)]

mod validator;

pub use validator::{
    check_graph, check_structure, Endpoint, Gatekeeper, ValidationReport, Violation,
};
