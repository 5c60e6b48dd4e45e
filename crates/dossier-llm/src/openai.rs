//! OpenAI Provider Implementation
//!
//! Adapter for the OpenAI chat completions API. Text-only: document
//! content arrives inlined in the prompt, and the request pins
//! `response_format` to `json_object` so the model emits a JSON body.

use crate::LlmError;
use async_trait::async_trait;
use dossier_domain::traits::Provider;
use dossier_domain::UploadedFile;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default OpenAI API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

/// Default timeout for HTTP requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// OpenAI chat completions provider
#[derive(Debug)]
pub struct OpenAiProvider {
    endpoint: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider for the given model
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
impl Provider for OpenAiProvider {
    type Error = LlmError;

    async fn upload_file(&self, _path: &Path) -> Result<UploadedFile, LlmError> {
        Err(LlmError::UploadUnsupported("OpenAI"))
    }

    async fn generate(
        &self,
        prompt: &str,
        _attachment: Option<&UploadedFile>,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let url = format!("{}/v1/chat/completions", self.endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: "OpenAI",
                message: format!("{}: {}", status, body),
            });
        }

        let parsed = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("chat response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("no choices returned".to_string()))
    }
}
