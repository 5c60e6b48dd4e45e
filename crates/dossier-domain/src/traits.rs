//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates (dossier-llm).

use crate::payload::UploadedFile;
use async_trait::async_trait;
use std::path::Path;

/// The shared "generate" capability of every LLM vendor adapter.
///
/// An adapter is constructed once at configuration time for a specific
/// model and credential; `generate` returns the raw model output, which is
/// expected - but not guaranteed - to be JSON. Adapters perform no JSON
/// validation themselves.
#[async_trait]
pub trait Provider {
    /// Error type for provider operations
    type Error;

    /// Whether this provider accepts native file uploads for multimodal
    /// input. Text-only providers receive document content inlined into
    /// the prompt instead.
    fn supports_file_upload(&self) -> bool {
        false
    }

    /// Upload a file natively and wait until the provider reports it ready
    /// for use. Text-only providers return an error.
    async fn upload_file(&self, path: &Path) -> Result<UploadedFile, Self::Error>;

    /// Invoke the model with the assembled prompt and an optional uploaded
    /// file, returning the raw response text.
    async fn generate(
        &self,
        prompt: &str,
        attachment: Option<&UploadedFile>,
    ) -> Result<String, Self::Error>;
}
