use crate::{errors::AnswerError, providers::ai::CompletionProvider, types::PromptPayload};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::time::Duration;
use tracing::{debug, error, warn};

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    content: String,
}

// --- Gateway configuration ---

/// Connection settings for the completion service, passed in at construction
/// time so pipeline logic never reads ambient globals.
#[derive(Clone, Deserialize)]
pub struct CompletionSettings {
    /// Chat-completions endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer credential. Opaque secret; never logged.
    #[serde(default)]
    pub api_key: String,
    /// Sent as the `HTTP-Referer` identification header.
    #[serde(default = "default_referer")]
    pub referer: String,
    /// Sent as the `X-Title` identification header.
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries after the initial attempt, for transient failures only.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_api_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_referer() -> String {
    "http://localhost:8080".to_string()
}

fn default_app_title() -> String {
    "Samvidhan".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            referer: default_referer(),
            app_title: default_app_title(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Debug for CompletionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSettings")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("referer", &self.referer)
            .field("app_title", &self.app_title)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

// --- OpenRouter provider implementation ---

/// A provider for the OpenRouter chat-completions API (or any
/// OpenAI-compatible endpoint).
#[derive(Clone)]
pub struct OpenRouterProvider {
    client: ReqwestClient,
    settings: CompletionSettings,
}

impl Debug for OpenRouterProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterProvider")
            .field("api_url", &self.settings.api_url)
            .finish_non_exhaustive()
    }
}

impl OpenRouterProvider {
    /// Creates a new `OpenRouterProvider`.
    ///
    /// The HTTP client is built once with the configured request timeout;
    /// a missing credential fails here rather than on the first request.
    pub fn new(settings: CompletionSettings) -> Result<Self, AnswerError> {
        if settings.api_key.is_empty() {
            return Err(AnswerError::MissingApiKey);
        }

        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(AnswerError::ReqwestClientBuild)?;

        Ok(Self { client, settings })
    }

    /// A single request/response attempt with no retry logic.
    async fn complete_once(&self, request_body: &ChatRequest<'_>) -> Result<String, AnswerError> {
        let response = self
            .client
            .post(&self.settings.api_url)
            .bearer_auth(&self.settings.api_key)
            .header("HTTP-Referer", &self.settings.referer)
            .header("X-Title", &self.settings.app_title)
            .json(request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnswerError::CompletionTimeout
                } else {
                    AnswerError::CompletionRequest(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AnswerError::CompletionApi {
                status: status.as_u16(),
                detail,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnswerError::MalformedCompletion(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                AnswerError::MalformedCompletion("response contained no choices".to_string())
            })
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    /// Sends the payload, retrying transient failures up to the configured
    /// bound with linear backoff. Terminal failures keep the upstream error
    /// detail for operator logs.
    async fn complete(&self, payload: &PromptPayload) -> Result<String, AnswerError> {
        let request_body = ChatRequest {
            model: &payload.model_id,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &payload.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &payload.user_content,
                },
            ],
            temperature: payload.temperature,
            max_tokens: payload.max_tokens,
        };

        debug!(model = %payload.model_id, max_tokens = payload.max_tokens, "--> Sending completion request");

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.complete_once(&request_body).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt <= self.settings.max_retries => {
                    warn!(attempt, error = %e, "Transient completion failure, retrying");
                    tokio::time::sleep(Duration::from_millis(200 * u64::from(attempt))).await;
                }
                Err(e) => {
                    error!(attempt, error = %e, "Completion request failed");
                    return Err(e);
                }
            }
        }
    }
}
