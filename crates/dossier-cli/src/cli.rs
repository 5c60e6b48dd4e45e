//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dossier CLI - crowd-sourced extraction of dossier records from
/// unstructured documents.
#[derive(Debug, Parser)]
#[command(name = "dossier")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a batch of documents with an LLM provider
    Run(RunArgs),

    /// Claim a batch to prevent duplicate work
    Claim(ClaimArgs),

    /// Validate produced dossier records against the schema and graph rules
    Validate(ValidateArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Batch ID to process (subdirectory of data/raw_batches)
    #[arg(long)]
    pub batch: String,

    /// Model to use
    #[arg(long, env = "MODEL_NAME", default_value = "gemini-2.0-flash")]
    pub model: String,
}

/// Arguments for the claim command.
#[derive(Debug, Parser)]
pub struct ClaimArgs {
    /// Batch ID to claim (e.g. 001)
    #[arg(long)]
    pub batch: String,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Dossier record files to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to the schema definition
    #[arg(long, default_value = "schema.json")]
    pub schema: PathBuf,
}
