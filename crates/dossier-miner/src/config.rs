//! Miner configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct MinerConfig {
    /// Directory receiving one JSON record per accepted document
    pub output_dir: PathBuf,

    /// Path to the prompt template file
    pub template_path: PathBuf,

    /// Fixed pause between successive document invocations. Not adaptive;
    /// provider throttling errors do not lengthen it.
    pub rate_limit: Duration,

    /// Timeout applied to each provider invocation
    pub call_timeout: Duration,

    /// File extensions (lowercase, no dot) accepted from a batch directory
    pub accepted_extensions: Vec<String>,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data/processed"),
            template_path: PathBuf::from("prompt.md"),
            rate_limit: Duration::from_secs(1),
            call_timeout: Duration::from_secs(120),
            accepted_extensions: ["txt", "md", "pdf", "png", "jpg", "jpeg"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl MinerConfig {
    /// Whether a file's extension is accepted for processing.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .is_some_and(|e| self.accepted_extensions.iter().any(|a| *a == e))
    }
}
