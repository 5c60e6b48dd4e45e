//! Dossier Domain Layer
//!
//! Core concepts shared by every other crate in the workspace:
//!
//! - **Dossier record**: the structured JSON produced for one source
//!   document (`meta` + `entities` + `connections`)
//! - **Schema definition**: the externally supplied schema description that
//!   drives top-level validation and is embedded into extraction prompts
//! - **Document payload**: either extracted text or a provider-native
//!   uploaded-file handle
//! - **Provider trait**: the single "generate" capability every LLM vendor
//!   adapter implements
//!
//! Infrastructure implementations (HTTP providers, the claim ledger, the
//! batch miner) live in other crates and depend on this one.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod payload;
pub mod record;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use payload::{DocumentPayload, UploadedFile};
pub use record::{DossierRecord, RECORD_SECTIONS, REQUIRED_META_FIELDS};
pub use schema::{SchemaDefinition, SchemaError};
