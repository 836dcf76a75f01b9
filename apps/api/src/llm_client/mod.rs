/// LLM Client: the single point of entry for all model calls in the service.
///
/// ARCHITECTURAL RULE: No other module may talk to the Ollama server directly.
/// All generation goes through the `TextGenerator` trait defined here.
///
/// The model is an opaque text producer: callers get the raw response text or a
/// typed `LlmError`. Whether an error is shown to the user as document content is
/// decided by the orchestration layer, not here.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama2:7b";

const GENERATE_PATH: &str = "/api/generate";
const TAGS_PATH: &str = "/api/tags";
const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const TEMPERATURE: f32 = 0.7;

/// Failure modes of a model call. The `Display` strings are operator-facing and
/// end up verbatim in documents when errors are embedded as content.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection failed: Is Ollama running? Start it with 'ollama serve'")]
    Connection(#[source] reqwest::Error),

    #[error("Request to Ollama timed out after {0} seconds")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No response generated")]
    EmptyResponse,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl LlmError {
    fn from_transport(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_connect() {
            LlmError::Connection(e)
        } else if e.is_timeout() {
            LlmError::Timeout(timeout.as_secs())
        } else {
            LlmError::Unexpected(e.to_string())
        }
    }
}

/// Anything that turns a prompt into text. `AppState` carries an
/// `Arc<dyn TextGenerator>` so tests can swap in a stub.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError>;

    /// Liveness probe: names of the models the server has pulled.
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;

    fn model(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Client for a locally running Ollama server.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let client = Client::builder()
            .build()
            .map_err(|e| LlmError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: max_tokens,
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(self.url(GENERATE_PATH))
            .timeout(GENERATION_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(e, GENERATION_TIMEOUT))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Ollama returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::from_transport(e, GENERATION_TIMEOUT))?;

        let text = parsed.response.ok_or(LlmError::EmptyResponse)?;
        debug!(
            model = %self.model,
            max_tokens,
            chars = text.len(),
            "Ollama generation succeeded"
        );
        Ok(text)
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let response = self
            .client
            .get(self.url(TAGS_PATH))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(e, PROBE_TIMEOUT))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::from_transport(e, PROBE_TIMEOUT))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
