//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema definition could not be loaded
    #[error("Schema error: {0}")]
    Schema(#[from] dossier_domain::SchemaError),

    /// Provider layer error
    #[error("{0}")]
    Llm(#[from] dossier_llm::LlmError),

    /// Batch run aborted
    #[error("{0}")]
    Miner(#[from] dossier_miner::MinerError),

    /// Claim ledger error
    #[error("{0}")]
    Ledger(#[from] dossier_ledger::LedgerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Batch already claimed; details were printed by the claim command
    #[error("batch already claimed")]
    Conflict,

    /// One or more files failed validation; verdicts were printed per file
    #[error("{0} file(s) failed validation")]
    ValidationFailed(usize),
}

impl CliError {
    /// Whether the failure was already reported to the user in full,
    /// so main should only set the exit code.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::Conflict | CliError::ValidationFailed(_))
    }
}
