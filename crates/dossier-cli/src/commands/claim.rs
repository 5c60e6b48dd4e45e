//! Claim command implementation.

use crate::cli::ClaimArgs;
use crate::config::{Config, CLAIMS_DIR};
use crate::error::{CliError, Result};
use crate::output::Console;
use dossier_ledger::{ClaimLedger, LedgerError};

/// Execute the claim command.
///
/// Exits non-zero on conflict so the claim step can gate automated
/// pipelines such as pre-commit hooks.
pub fn execute_claim(args: ClaimArgs, config: &Config, console: &Console) -> Result<()> {
    let ledger = ClaimLedger::new(CLAIMS_DIR)?;

    match ledger.claim(&args.batch, &config.contributor_handle) {
        Ok(_) => {
            console.success(&format!("Batch {} locked to you!", args.batch));
            console.note(&format!(
                "IMPORTANT: Run 'git add claims/ && git commit -m \"Claim batch {}\" && git push' immediately!",
                args.batch
            ));
            Ok(())
        }
        Err(LedgerError::AlreadyClaimed { batch_id, claimant }) => {
            console.locked(&format!(
                "Batch {} is already claimed by: {}",
                batch_id, claimant
            ));
            console.note("Please choose a different batch.");
            Err(CliError::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}
