//! Environment-derived configuration and repository layout.
//!
//! The core treats credentials and operator identity as external
//! configuration: nothing is validated beyond presence, and a missing
//! credential only surfaces when the matching provider is selected.

use dossier_llm::ProviderKind;
use std::env;

/// Schema definition file at the repository root.
pub const SCHEMA_PATH: &str = "schema.json";

/// Prompt template file at the repository root.
pub const PROMPT_TEMPLATE_PATH: &str = "prompt.md";

/// Input batches live in per-batch subdirectories of this directory.
pub const RAW_BATCHES_DIR: &str = "data/raw_batches";

/// Validated records are written here, one JSON file per document.
pub const PROCESSED_DIR: &str = "data/processed";

/// Claim records live here, one text file per batch id.
pub const CLAIMS_DIR: &str = "claims";

/// Configuration read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini credential, if set
    pub gemini_api_key: Option<String>,

    /// OpenAI credential, if set
    pub openai_api_key: Option<String>,

    /// Anthropic credential, if set
    pub anthropic_api_key: Option<String>,

    /// Contributor handle stamped into claims and record provenance
    pub contributor_handle: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok(),
            contributor_handle: env::var("CONTRIBUTOR_HANDLE")
                .unwrap_or_else(|_| "Anonymous".to_string()),
        }
    }

    /// The credential configured for a provider family, if any.
    pub fn credential_for(&self, kind: ProviderKind) -> Option<String> {
        match kind {
            ProviderKind::Gemini => self.gemini_api_key.clone(),
            ProviderKind::OpenAi => self.openai_api_key.clone(),
            ProviderKind::Anthropic => self.anthropic_api_key.clone(),
        }
    }
}
