//! Dossier LLM Provider Layer
//!
//! Adapter implementations of the `Provider` trait from `dossier-domain`,
//! one per vendor API, behind an explicit model-name dispatch table.
//!
//! # Providers
//!
//! - `GeminiProvider`: Google Generative Language API, multimodal via the
//!   Files API (native uploads with a bounded readiness poll)
//! - `OpenAiProvider`: OpenAI chat completions, text-only
//! - `AnthropicProvider`: Anthropic messages API, text-only
//! - `MockProvider`: deterministic mock for testing
//!
//! # Dispatch
//!
//! Model names are mapped to a provider family once, at configuration
//! time, through [`ProviderKind::resolve`]. An unrecognized name is a
//! configuration error; no adapter is ever invoked for it.
//!
//! # Examples
//!
//! ```
//! use dossier_llm::ProviderKind;
//!
//! assert_eq!(ProviderKind::resolve("gemini-2.0-flash").unwrap(), ProviderKind::Gemini);
//! assert_eq!(ProviderKind::resolve("GPT-4o").unwrap(), ProviderKind::OpenAi);
//! assert!(ProviderKind::resolve("llama3").is_err());
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use dossier_domain::traits::Provider;
use dossier_domain::UploadedFile;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Required credential environment variable is not set
    #[error("Missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Model name matched no known provider family
    #[error("Unknown model provider for '{0}'")]
    UnknownProvider(String),

    /// Network or transport-level failure
    #[error("Communication error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider API rejected the request
    #[error("{provider} API error: {message}")]
    Api {
        /// Provider family that produced the error
        provider: &'static str,
        /// Error detail from the response
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider does not accept native file uploads
    #[error("File upload not supported by {0}")]
    UploadUnsupported(&'static str),

    /// Uploaded file never left the processing state
    #[error("File upload did not become ready within {0:?}")]
    UploadTimeout(Duration),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// The three supported provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Google Gemini (multimodal)
    Gemini,
    /// OpenAI (text-only)
    OpenAi,
    /// Anthropic Claude (text-only)
    Anthropic,
}

/// Model-name substring -> provider family mapping, consulted in order.
const DISPATCH_TABLE: [(&str, ProviderKind); 3] = [
    ("gemini", ProviderKind::Gemini),
    ("gpt", ProviderKind::OpenAi),
    ("claude", ProviderKind::Anthropic),
];

impl ProviderKind {
    /// Resolve a model name to its provider family.
    ///
    /// Matching is case-insensitive against the fixed dispatch table.
    /// Resolution happens once at configuration time; an unknown name is
    /// a configuration failure, not a crash.
    pub fn resolve(model_name: &str) -> Result<Self, LlmError> {
        let lowered = model_name.to_ascii_lowercase();
        DISPATCH_TABLE
            .iter()
            .find(|(needle, _)| lowered.contains(needle))
            .map(|(_, kind)| *kind)
            .ok_or_else(|| LlmError::UnknownProvider(model_name.to_string()))
    }

    /// Human-readable provider family name.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
        }
    }

    /// Environment variable holding this family's credential.
    pub fn credential_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// A configured provider adapter, resolved once from a model name.
///
/// Enum dispatch keeps the miner generic over the `Provider` trait while
/// letting the CLI pick the concrete adapter at runtime.
#[derive(Debug)]
pub enum ProviderClient {
    /// Gemini adapter
    Gemini(GeminiProvider),
    /// OpenAI adapter
    OpenAi(OpenAiProvider),
    /// Anthropic adapter
    Anthropic(AnthropicProvider),
}

impl ProviderClient {
    /// Construct the adapter for a provider family.
    ///
    /// A missing credential is reported to the caller as a recoverable
    /// configuration failure.
    pub fn connect(
        kind: ProviderKind,
        model: &str,
        api_key: Option<String>,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.ok_or(LlmError::MissingCredential(kind.credential_var()))?;
        Ok(match kind {
            ProviderKind::Gemini => ProviderClient::Gemini(GeminiProvider::new(api_key, model)),
            ProviderKind::OpenAi => ProviderClient::OpenAi(OpenAiProvider::new(api_key, model)),
            ProviderKind::Anthropic => {
                ProviderClient::Anthropic(AnthropicProvider::new(api_key, model))
            }
        })
    }
}

#[async_trait]
impl Provider for ProviderClient {
    type Error = LlmError;

    fn supports_file_upload(&self) -> bool {
        match self {
            ProviderClient::Gemini(p) => p.supports_file_upload(),
            ProviderClient::OpenAi(p) => p.supports_file_upload(),
            ProviderClient::Anthropic(p) => p.supports_file_upload(),
        }
    }

    async fn upload_file(&self, path: &Path) -> Result<UploadedFile, LlmError> {
        match self {
            ProviderClient::Gemini(p) => p.upload_file(path).await,
            ProviderClient::OpenAi(p) => p.upload_file(path).await,
            ProviderClient::Anthropic(p) => p.upload_file(path).await,
        }
    }

    async fn generate(
        &self,
        prompt: &str,
        attachment: Option<&UploadedFile>,
    ) -> Result<String, LlmError> {
        match self {
            ProviderClient::Gemini(p) => p.generate(prompt, attachment).await,
            ProviderClient::OpenAi(p) => p.generate(prompt, attachment).await,
            ProviderClient::Anthropic(p) => p.generate(prompt, attachment).await,
        }
    }
}

/// Mock provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use dossier_llm::MockProvider;
/// use dossier_domain::traits::Provider;
///
/// # tokio_test::block_on(async {
/// let provider = MockProvider::new(r#"{"meta": {}}"#);
/// let result = provider.generate("any prompt", None).await.unwrap();
/// assert_eq!(result, r#"{"meta": {}}"#);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

/// Sentinel stored in the response map to script a failure.
const MOCK_ERROR: &str = "\0ERROR";

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Configure a provider error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), MOCK_ERROR.to_string());
    }

    /// Number of times `generate` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"meta": {}, "entities": [], "connections": []}"#)
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Error = LlmError;

    async fn upload_file(&self, _path: &Path) -> Result<UploadedFile, LlmError> {
        Err(LlmError::UploadUnsupported("MockProvider"))
    }

    async fn generate(
        &self,
        prompt: &str,
        _attachment: Option<&UploadedFile>,
    ) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(prompt) {
            if response == MOCK_ERROR {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_gemini() {
        assert_eq!(
            ProviderKind::resolve("gemini-2.0-flash").unwrap(),
            ProviderKind::Gemini
        );
        assert_eq!(
            ProviderKind::resolve("GEMINI-1.5-PRO").unwrap(),
            ProviderKind::Gemini
        );
    }

    #[test]
    fn test_resolve_openai() {
        assert_eq!(ProviderKind::resolve("gpt-4o").unwrap(), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::resolve("GPT-4o-mini").unwrap(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_resolve_anthropic() {
        assert_eq!(
            ProviderKind::resolve("claude-sonnet-4-20250514").unwrap(),
            ProviderKind::Anthropic
        );
        assert_eq!(
            ProviderKind::resolve("Claude-3-Haiku").unwrap(),
            ProviderKind::Anthropic
        );
    }

    #[test]
    fn test_resolve_unknown_is_config_failure() {
        let err = ProviderKind::resolve("llama3").unwrap_err();
        assert!(matches!(err, LlmError::UnknownProvider(name) if name == "llama3"));
    }

    #[test]
    fn test_connect_without_credential() {
        let err = ProviderClient::connect(ProviderKind::OpenAi, "gpt-4o", None).unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential("OPENAI_API_KEY")));
    }

    #[test]
    fn test_credential_vars() {
        assert_eq!(ProviderKind::Gemini.credential_var(), "GEMINI_API_KEY");
        assert_eq!(ProviderKind::OpenAi.credential_var(), "OPENAI_API_KEY");
        assert_eq!(ProviderKind::Anthropic.credential_var(), "ANTHROPIC_API_KEY");
    }

    #[tokio::test]
    async fn test_mock_provider_default_response() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt", None).await.unwrap();
        assert_eq!(result, "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");

        assert_eq!(provider.generate("hello", None).await.unwrap(), "world");
        assert_eq!(
            provider.generate("unknown", None).await.unwrap(),
            r#"{"meta": {}, "entities": [], "connections": []}"#
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("a", None).await.unwrap();
        provider.generate("b", None).await.unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate("bad prompt", None).await;
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[tokio::test]
    async fn test_mock_provider_rejects_uploads() {
        let provider = MockProvider::default();
        let result = provider.upload_file(Path::new("/tmp/x.pdf")).await;
        assert!(matches!(result.unwrap_err(), LlmError::UploadUnsupported(_)));
    }
}
