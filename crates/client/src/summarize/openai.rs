//! OpenAI chat-completions summarizer.
//!
//! ### Specification
//!
//! - **Endpoint**: `{base_url}/chat/completions`
//! - **Authentication**: bearer token from `OPENAI_API_KEY`.
//! - **Request**: system + user messages, `response_format = json_object`,
//!   temperature 0.2.
//! - **Response**: the first choice's message content is the raw answer text.

use std::time::Duration;

use async_trait::async_trait;
use newsdesk_core::{AppConfig, Error};
use serde::{Deserialize, Serialize};

use super::{SummarizeError, Summarizer};

/// Default base URL for the OpenAI API.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Detail reported when no key is configured.
pub const MISSING_KEY: &str = "OPENAI_API_KEY missing in backend environment";

/// Sampling temperature for summaries.
const TEMPERATURE: f32 = 0.2;

/// OpenAI client configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// Base URL (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Model (default: gpt-4o-mini).
    pub model: String,
    /// Request timeout (default: 60s).
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OpenAiConfig {
    /// Take the key, endpoint and model from the application config.
    ///
    /// Returns `Error::MissingCredentials` if no key is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, Error> {
        let api_key = config
            .require_openai_api_key()
            .map_err(|e| {
                tracing::debug!(error = %e, "summarizer key not configured");
                Error::MissingCredentials(MISSING_KEY.to_string())
            })?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            timeout: config.summarizer_timeout(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Summarizer backed by the OpenAI chat-completions API.
#[derive(Debug, Clone)]
pub struct OpenAiSummarizer {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiSummarizer {
    pub fn new(config: OpenAiConfig) -> Result<Self, Error> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingCredentials(MISSING_KEY.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::SummarizerFailed(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        Self::new(OpenAiConfig::from_app_config(config)?)
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, system: &str, evidence: &str) -> Result<String, SummarizeError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage { role: "system", content: system }, ChatMessage { role: "user", content: evidence }],
            response_format: ResponseFormat { kind: "json_object" },
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("summarizer response status: {}", status);

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(SummarizeError::Auth);
        }

        if !status.is_success() {
            return Err(SummarizeError::Api { status: status.as_u16() });
        }

        let bytes = response.bytes().await?;
        let body: ChatResponse = serde_json::from_slice(&bytes).map_err(|e| SummarizeError::Decode(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(SummarizeError::EmptyResponse)
    }
}
