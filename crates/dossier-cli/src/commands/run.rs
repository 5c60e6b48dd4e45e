//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::{Config, PROCESSED_DIR, PROMPT_TEMPLATE_PATH, RAW_BATCHES_DIR, SCHEMA_PATH};
use crate::error::Result;
use crate::output::Console;
use dossier_domain::SchemaDefinition;
use dossier_gatekeeper::Gatekeeper;
use dossier_llm::{ProviderClient, ProviderKind};
use dossier_miner::{DocumentOutcome, Miner, MinerConfig};
use std::path::{Path, PathBuf};

/// Execute the run command.
pub async fn execute_run(args: RunArgs, config: &Config, console: &Console) -> Result<()> {
    // Schema and provider are preconditions for every document in the batch
    let schema = SchemaDefinition::load(SCHEMA_PATH)?;
    let kind = ProviderKind::resolve(&args.model)?;
    let provider = ProviderClient::connect(kind, &args.model, config.credential_for(kind))?;

    let miner_config = MinerConfig {
        output_dir: PathBuf::from(PROCESSED_DIR),
        template_path: PathBuf::from(PROMPT_TEMPLATE_PATH),
        ..MinerConfig::default()
    };

    let miner = Miner::new(provider, Gatekeeper::new(schema), miner_config)
        .with_operator(&config.contributor_handle)
        .with_model_name(&args.model);

    let batch_dir = Path::new(RAW_BATCHES_DIR).join(&args.batch);
    let summary = miner.run(&batch_dir).await?;

    for outcome in &summary.outcomes {
        match outcome {
            DocumentOutcome::Saved { file, output } => {
                console.note(&format!("{} -> {}", file, output.display()));
            }
            DocumentOutcome::Skipped { file, reason } => {
                console.note(&format!("{} skipped: {}", file, reason));
            }
        }
    }
    console.success(&format!(
        "Batch {}: {} saved, {} skipped",
        args.batch,
        summary.saved_count(),
        summary.skipped_count()
    ));

    Ok(())
}
