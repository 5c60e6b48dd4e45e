//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::error::{CliError, Result};
use crate::output::Console;
use dossier_domain::{DossierRecord, SchemaDefinition};
use dossier_gatekeeper::Gatekeeper;
use std::path::Path;

/// Execute the validate command.
///
/// Runs both validation stages over each file and prints a per-file
/// verdict with itemized violations. Fails (non-zero exit) if any file
/// fails either stage.
pub fn execute_validate(args: ValidateArgs, console: &Console) -> Result<()> {
    // A missing schema is a precondition failure for every file
    let schema = SchemaDefinition::load(&args.schema)
        .map_err(|e| CliError::Config(format!("Schema file not usable: {}", e)))?;
    let gatekeeper = Gatekeeper::new(schema);

    let mut failed = 0usize;
    for path in &args.files {
        console.note(&format!("Validating {}...", path.display()));
        if !validate_file(path, &gatekeeper, console) {
            failed += 1;
        }
    }

    if failed > 0 {
        Err(CliError::ValidationFailed(failed))
    } else {
        Ok(())
    }
}

fn validate_file(path: &Path, gatekeeper: &Gatekeeper, console: &Console) -> bool {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            console.verdict(false);
            console.detail(&format!("Cannot read file: {}", e));
            return false;
        }
    };

    let record = match DossierRecord::parse(&contents) {
        Ok(record) => record,
        Err(e) => {
            console.verdict(false);
            console.detail(&format!("Invalid JSON syntax: {}", e));
            return false;
        }
    };

    let report = gatekeeper.validate(&record);
    if report.passed() {
        console.verdict(true);
        return true;
    }

    console.verdict(false);
    if !report.structural.is_empty() {
        console.heading("Schema Validation Errors:");
        for violation in &report.structural {
            console.detail(&violation.to_string());
        }
    }
    if !report.graph.is_empty() {
        console.heading("Graph Logic Errors:");
        for violation in &report.graph {
            console.detail(&violation.to_string());
        }
    }
    false
}
