//! Anthropic Provider Implementation
//!
//! Adapter for the Anthropic messages API. Text-only: document content
//! arrives inlined in the prompt. Anthropic has no JSON response mode, so
//! the prompt template itself instructs the model to emit bare JSON.

use crate::LlmError;
use async_trait::async_trait;
use dossier_domain::traits::Provider;
use dossier_domain::UploadedFile;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default Anthropic API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// API version header value required by the messages API
pub const API_VERSION: &str = "2023-06-01";

/// Default timeout for HTTP requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Maximum tokens requested per message
const MAX_TOKENS: u32 = 4096;

/// Anthropic messages provider
#[derive(Debug)]
pub struct AnthropicProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider for the given model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Override the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    type Error = LlmError;

    async fn upload_file(&self, _path: &Path) -> Result<UploadedFile, LlmError> {
        Err(LlmError::UploadUnsupported("Anthropic"))
    }

    async fn generate(
        &self,
        prompt: &str,
        _attachment: Option<&UploadedFile>,
    ) -> Result<String, LlmError> {
        let request_body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let url = format!("{}/v1/messages", self.endpoint);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: "Anthropic",
                message: format!("{}: {}", status, body),
            });
        }

        let parsed = response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("messages response: {}", e)))?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| LlmError::InvalidResponse("empty content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_upload_support() {
        let provider = AnthropicProvider::new("test-key", "claude-sonnet-4-20250514");
        assert!(!provider.supports_file_upload());
    }

    #[test]
    fn test_request_serialization() {
        let request = MessagesRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: "extract things".to_string(),
            }],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "claude-sonnet-4-20250514");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["messages"][0]["content"], "extract things");
    }
}
