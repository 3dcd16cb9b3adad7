use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::GatewayError;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Transport for one chat-completion round-trip.
///
/// Returns the raw text of the first choice, or `None` when the provider
/// answered without any content.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn chat(&self, request: &ChatRequest, api_key: &str) -> Result<Option<String>, GatewayError>;
}

/// OpenAI-compatible `/chat/completions` over HTTPS.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn chat(&self, request: &ChatRequest, api_key: &str) -> Result<Option<String>, GatewayError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 401 {
                return Err(GatewayError::InvalidCredential);
            }

            let message = match serde_json::from_str::<ApiErrorBody>(&error_text) {
                Ok(body) => body.error.message,
                Err(_) => match status.as_u16() {
                    429 => "Rate limit exceeded. Please try again later".to_string(),
                    500..=599 => "Provider server error. Please try again later".to_string(),
                    _ => error_text,
                },
            };

            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}

/// Single-shot completion client: one request per call, no retries.
#[derive(Clone)]
pub struct LLMClient {
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl LLMClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn openai(base_url: &str, model: &str) -> Self {
        Self::new(Arc::new(OpenAiBackend::new(base_url)), model)
    }

    /// Sends `prompt` as a single user message and returns the trimmed text.
    pub async fn complete(
        &self,
        prompt: &str,
        api_key: &str,
        max_tokens: Option<u32>,
    ) -> Result<String, GatewayError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            warn!("completion skipped: no API key");
            return Err(GatewayError::MissingCredential);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens,
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "sending completion request");

        let text = self.backend.chat(&request, api_key).await.map_err(|e| {
            warn!(kind = e.kind(), error = %e, "completion request failed");
            e
        })?;

        match text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => {
                warn!("completion returned no content");
                Err(GatewayError::EmptyResponse)
            }
        }
    }

    /// Like [`complete`](Self::complete), then parses the text as JSON.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        api_key: &str,
        max_tokens: Option<u32>,
    ) -> Result<T, GatewayError> {
        let text = self.complete(prompt, api_key, max_tokens).await?;
        parse_json(&text).map_err(|e| {
            warn!(content = %text, "model response is not valid JSON");
            e
        })
    }
}

/// Parses model output as JSON, tolerating a surrounding markdown fence.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, GatewayError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    serde_json::from_str(body).map_err(|e| GatewayError::NotJson {
        content: text.to_string(),
        reason: e.to_string(),
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    // Drop the info string (`json`), which may share a line with the payload.
    let info_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let (info, body) = rest.split_at(info_len);
    let is_info = !info.is_empty()
        && !matches!(info, "true" | "false" | "null")
        && !info.starts_with(|c: char| c.is_ascii_digit());
    if is_info {
        body.trim()
    } else {
        rest.trim()
    }
}
