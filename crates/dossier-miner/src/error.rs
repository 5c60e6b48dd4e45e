//! Error types for the miner
//!
//! Only run-level preconditions surface here. Per-document failures are
//! not errors: they become `DocumentOutcome::Skipped` entries and the
//! batch continues.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole batch run
#[derive(Error, Debug)]
pub enum MinerError {
    /// Prompt template file is missing
    #[error("Prompt template not found at {0}")]
    TemplateMissing(PathBuf),

    /// Batch input directory is missing
    #[error("Batch directory not found: {0}")]
    BatchDirMissing(PathBuf),

    /// Schema definition could not be serialized for the prompt
    #[error("Schema serialization failed: {0}")]
    Schema(#[from] serde_json::Error),

    /// Filesystem error outside any single document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
