//! Gemini Provider Implementation
//!
//! Adapter for the Google Generative Language API. This is the one
//! multimodal-capable provider: documents can be uploaded natively through
//! the Files API (PDFs and images included, bypassing text extraction) and
//! referenced from the generation request.
//!
//! Uploads land in a `PROCESSING` state and must be polled until `ACTIVE`.
//! The poll is bounded: exponential backoff between attempts and a maximum
//! elapsed time, after which the upload is reported as timed out.

use crate::LlmError;
use async_trait::async_trait;
use dossier_domain::traits::Provider;
use dossier_domain::UploadedFile;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Generative Language API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default timeout for HTTP requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Initial delay between upload-readiness polls
const POLL_INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Upper bound on a single poll delay
const POLL_MAX_DELAY: Duration = Duration::from_secs(5);

/// Maximum total time to wait for an upload to become ready
const POLL_MAX_ELAPSED: Duration = Duration::from_secs(120);

/// Bounds on the upload-readiness poll loop
#[derive(Debug, Clone, Copy)]
struct PollConfig {
    initial_delay: Duration,
    max_delay: Duration,
    max_elapsed: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: POLL_INITIAL_DELAY,
            max_delay: POLL_MAX_DELAY,
            max_elapsed: POLL_MAX_ELAPSED,
        }
    }
}

/// Backoff schedule for the readiness poll: each wait doubles up to the
/// per-wait cap, and no further waits are issued once the elapsed budget
/// is spent.
struct PollSchedule {
    config: PollConfig,
    next: Duration,
    elapsed: Duration,
}

impl PollSchedule {
    fn new(config: PollConfig) -> Self {
        Self {
            config,
            next: config.initial_delay,
            elapsed: Duration::ZERO,
        }
    }

    /// The next wait before re-checking, or None once the budget is spent
    fn next_delay(&mut self) -> Option<Duration> {
        if self.elapsed >= self.config.max_elapsed {
            return None;
        }
        let delay = self.next;
        self.elapsed += delay;
        self.next = (self.next * 2).min(self.config.max_delay);
        Some(delay)
    }
}

/// Gemini API provider
#[derive(Debug)]
pub struct GeminiProvider {
    endpoint: String,
    api_key: String,
    model: String,
    poll: PollConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

#[derive(Serialize)]
struct FileData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    #[serde(rename = "fileUri")]
    file_uri: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    file: FileMetadata,
}

#[derive(Deserialize)]
struct FileMetadata {
    name: String,
    uri: String,
    #[serde(rename = "mimeType")]
    mime_type: String,
    state: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider for the given model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            poll: PollConfig::default(),
            client,
        }
    }

    /// Override the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the upload readiness poll bounds
    pub fn with_poll_bounds(
        mut self,
        initial_delay: Duration,
        max_delay: Duration,
        max_elapsed: Duration,
    ) -> Self {
        self.poll = PollConfig {
            initial_delay,
            max_delay,
            max_elapsed,
        };
        self
    }

    /// Guess the MIME type to declare for an uploaded document
    fn mime_type_for(path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("md") => "text/markdown",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }

    /// Fetch current metadata for an uploaded file
    async fn file_state(&self, name: &str) -> Result<FileMetadata, LlmError> {
        let url = format!("{}/v1beta/{}?key={}", self.endpoint, name, self.api_key);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(LlmError::Api {
                provider: "Gemini",
                message: format!("file status returned {}", response.status()),
            });
        }

        Ok(response.json::<FileMetadata>().await?)
    }

    /// Poll an upload until it becomes ACTIVE, with exponential backoff
    /// and a hard elapsed-time bound
    async fn await_ready(&self, mut file: FileMetadata) -> Result<FileMetadata, LlmError> {
        let mut schedule = PollSchedule::new(self.poll);

        while file.state == "PROCESSING" {
            let Some(delay) = schedule.next_delay() else {
                warn!(
                    "Upload {} still processing after {:?}",
                    file.name, self.poll.max_elapsed
                );
                return Err(LlmError::UploadTimeout(self.poll.max_elapsed));
            };

            debug!("Upload {} processing, retrying in {:?}", file.name, delay);
            tokio::time::sleep(delay).await;

            file = self.file_state(&file.name).await?;
        }

        if file.state != "ACTIVE" {
            return Err(LlmError::Api {
                provider: "Gemini",
                message: format!("uploaded file entered state '{}'", file.state),
            });
        }

        Ok(file)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    type Error = LlmError;

    fn supports_file_upload(&self) -> bool {
        true
    }

    async fn upload_file(&self, path: &Path) -> Result<UploadedFile, LlmError> {
        let bytes = std::fs::read(path)
            .map_err(|e| LlmError::Other(format!("cannot read {}: {}", path.display(), e)))?;
        let mime_type = Self::mime_type_for(path);

        debug!("Uploading {} ({} bytes, {})", path.display(), bytes.len(), mime_type);

        let url = format!("{}/upload/v1beta/files?key={}", self.endpoint, self.api_key);
        let response = self
            .client
            .post(&url)
            .header("X-Goog-Upload-Protocol", "raw")
            .header("Content-Type", mime_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LlmError::Api {
                provider: "Gemini",
                message: format!("file upload returned {}", response.status()),
            });
        }

        let uploaded = response
            .json::<UploadResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("upload response: {}", e)))?;

        let ready = self.await_ready(uploaded.file).await?;

        Ok(UploadedFile {
            name: ready.name,
            uri: ready.uri,
            mime_type: ready.mime_type,
        })
    }

    async fn generate(
        &self,
        prompt: &str,
        attachment: Option<&UploadedFile>,
    ) -> Result<String, LlmError> {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];
        if let Some(file) = attachment {
            parts.push(Part::FileData {
                file_data: FileData {
                    mime_type: file.mime_type.clone(),
                    file_uri: file.uri.clone(),
                },
            });
        }

        let request_body = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let response = self.client.post(&url).json(&request_body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: "Gemini",
                message: format!("{}: {}", status, body),
            });
        }

        let parsed = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("generate response: {}", e)))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| LlmError::InvalidResponse("no candidates returned".to_string()))
    }
}
