//! The batch extraction orchestrator

use crate::config::MinerConfig;
use crate::error::MinerError;
use crate::prepare::{prepare_document, Prepared};
use crate::prompt::{PromptTemplate, FILE_PLACEHOLDER};
use dossier_domain::traits::Provider;
use dossier_domain::DossierRecord;
use dossier_gatekeeper::{check_structure, Gatekeeper};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// What happened to one document in a batch run.
#[derive(Debug, Clone)]
pub enum DocumentOutcome {
    /// Record validated and persisted
    Saved {
        /// Source file name
        file: String,
        /// Path of the persisted record
        output: PathBuf,
    },

    /// Document produced no output; the batch continued
    Skipped {
        /// Source file name
        file: String,
        /// Why the document was skipped
        reason: String,
    },
}

impl DocumentOutcome {
    /// The source file name this outcome refers to.
    pub fn file(&self) -> &str {
        match self {
            DocumentOutcome::Saved { file, .. } => file,
            DocumentOutcome::Skipped { file, .. } => file,
        }
    }
}

/// Result of one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Per-document outcomes, in processing order
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchSummary {
    /// Number of documents persisted.
    pub fn saved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, DocumentOutcome::Saved { .. }))
            .count()
    }

    /// Number of documents skipped.
    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.saved_count()
    }
}

/// The Miner runs one batch of documents through a configured provider.
pub struct Miner<P> {
    provider: P,
    gatekeeper: Gatekeeper,
    config: MinerConfig,
    processed_by: String,
    model_name: String,
}

impl<P> Miner<P>
where
    P: Provider + Send + Sync,
    P::Error: std::fmt::Display,
{
    /// Create a new Miner.
    pub fn new(provider: P, gatekeeper: Gatekeeper, config: MinerConfig) -> Self {
        Self {
            provider,
            gatekeeper,
            config,
            processed_by: "Anonymous".to_string(),
            model_name: "llm".to_string(),
        }
    }

    /// Set the contributor handle stamped into `meta.processed_by`.
    pub fn with_operator(mut self, handle: impl Into<String>) -> Self {
        self.processed_by = handle.into();
        self
    }

    /// Set the model name stamped into `meta.model`.
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Process every accepted file in the batch directory.
    ///
    /// Documents are processed sequentially in file-name order, with the
    /// configured pause between invocations. Any single-document failure
    /// is terminal for that document only.
    pub async fn run(&self, batch_dir: &Path) -> Result<BatchSummary, MinerError> {
        let template = PromptTemplate::load(&self.config.template_path)?;
        let schema_json = self.gatekeeper.schema().to_pretty_json()?;

        let entries = match std::fs::read_dir(batch_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MinerError::BatchDirMissing(batch_dir.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && self.config.accepts(path))
            .collect();
        files.sort();

        info!(
            "Found {} files in {}. Using model: {}",
            files.len(),
            batch_dir.display(),
            self.model_name
        );

        std::fs::create_dir_all(&self.config.output_dir)?;

        let mut summary = BatchSummary::default();
        for path in files {
            let outcome = self.process_document(&path, &template, &schema_json).await;
            match &outcome {
                DocumentOutcome::Saved { file, output } => {
                    info!("Success: {} saved to {}", file, output.display());
                }
                DocumentOutcome::Skipped { file, reason } => {
                    warn!("Skipped {}: {}", file, reason);
                }
            }
            summary.outcomes.push(outcome);

            tokio::time::sleep(self.config.rate_limit).await;
        }

        info!(
            "Batch complete: {} saved, {} skipped",
            summary.saved_count(),
            summary.skipped_count()
        );

        Ok(summary)
    }

    /// Run one document through prepare -> invoke -> parse -> stamp ->
    /// validate -> persist. Never fails the batch; every problem becomes
    /// a Skipped outcome.
    async fn process_document(
        &self,
        path: &Path,
        template: &PromptTemplate,
        schema_json: &str,
    ) -> DocumentOutcome {
        let file = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unnamed>")
            .to_string();
        let skipped = |reason: String| DocumentOutcome::Skipped {
            file: file.clone(),
            reason,
        };

        info!("Processing {} with {}...", file, self.model_name);

        let payload = match prepare_document(&self.provider, path).await {
            Prepared::Payload(payload) => payload,
            Prepared::Skipped(reason) => return skipped(reason),
        };

        let document_text = payload.text().unwrap_or(FILE_PLACEHOLDER);
        let prompt = template.render(schema_json, document_text);
        debug!("Prompt length: {} chars", prompt.len());

        let response = match timeout(
            self.config.call_timeout,
            self.provider.generate(&prompt, payload.file()),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return skipped(format!("provider error: {}", e)),
            Err(_) => {
                return skipped(format!(
                    "provider call timed out after {:?}",
                    self.config.call_timeout
                ))
            }
        };

        let mut record = match DossierRecord::parse(&response) {
            Ok(record) => record,
            Err(e) => {
                // Raw response logged in full for manual diagnosis
                warn!("Invalid JSON returned for {}: {}\n{}", file, e, response);
                return skipped("response was not valid JSON".to_string());
            }
        };

        record.inject_provenance(&self.processed_by, &self.model_name);

        let violations = check_structure(&record, self.gatekeeper.schema());
        if !violations.is_empty() {
            let listed: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
            return skipped(format!("validation failed: {}", listed.join("; ")));
        }

        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => return skipped("file name is not valid UTF-8".to_string()),
        };
        let output = self.config.output_dir.join(format!("{}.json", stem));

        let pretty = match record.to_pretty_json() {
            Ok(pretty) => pretty,
            Err(e) => return skipped(format!("record serialization failed: {}", e)),
        };

        // Full serialization before the write; a failed document leaves no
        // partial file behind
        if let Err(e) = std::fs::write(&output, pretty) {
            return skipped(format!("cannot write output: {}", e));
        }

        DocumentOutcome::Saved { file, output }
    }
}
