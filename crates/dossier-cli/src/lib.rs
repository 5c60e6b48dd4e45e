//! Dossier CLI library.
//!
//! Command-line surface over the dossier workspace: batch processing,
//! batch claiming, and record validation.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Console;
