//! LLM client: the single point of entry for all chat-completion calls in SkillSync.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenRouter / OpenAI API directly.
//! All LLM interactions MUST go through this module.
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol, so the same client
//! works against OpenRouter (default) and api.openai.com via `OPENROUTER_BASE_URL`.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Kept low so a single call stays under typical OpenRouter credit limits.
const DEFAULT_MAX_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection to the AI service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid or expired API key. Check OPENROUTER_API_KEY in .env")]
    InvalidKey,

    #[error("Not enough OpenRouter credits. Add credits at https://openrouter.ai/settings/credits or reduce usage.")]
    InsufficientCredits,

    #[error("Rate limit exceeded after {retries} retries. Please try again in a moment.")]
    RateLimited { retries: u32 },

    #[error("AI service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("AI provider does not support JSON mode: {0}")]
    JsonModeUnsupported(String),

    #[error("AI returned invalid JSON. Please try again. ({0})")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    UnexpectedShape(String),

    #[error("Empty response from the AI service")]
    EmptyContent,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn system(content: &'a str) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

/// Per-call knobs. `Default` gives temperature 0.2, 1024 max tokens, no JSON mode.
#[derive(Debug, Clone, Copy)]
pub struct CallOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Requests `response_format: {"type": "json_object"}`.
    pub json_mode: bool,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            json_mode: false,
        }
    }
}

impl CallOptions {
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            ..Self::default()
        }
    }

    pub fn json(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage<'a>],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
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
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single LLM client used by all services in SkillSync.
/// Wraps chat completions with retry logic, JSON-mode fallback and structured output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    referer: String,
    retry_base: Duration,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(120)).build()?,
            api_key: config.llm_api_key.clone(),
            base_url: config.llm_base_url.trim_end_matches('/').to_string(),
            model: config.llm_model.clone(),
            referer: config.app_url.clone(),
            retry_base: Duration::from_millis(1000),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a system + user prompt pair and returns the assistant's text.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        options: CallOptions,
    ) -> Result<String, LlmError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        self.chat(&messages, options).await
    }

    /// Like `complete`, but deserializes the reply as JSON.
    /// The prompt must instruct the model to return a JSON object.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
        options: CallOptions,
    ) -> Result<T, LlmError> {
        let text = self.complete(system, user, options).await?;
        parse_json_reply(&text)
    }

    /// Makes a chat-completion call and returns the first choice's content.
    ///
    /// Some OpenRouter providers reject JSON mode; when that happens the call is
    /// repeated once without `response_format`.
    pub async fn chat(
        &self,
        messages: &[ChatMessage<'_>],
        options: CallOptions,
    ) -> Result<String, LlmError> {
        let result = self.send_with_retry(messages, &options, options.json_mode).await;

        let response = match result {
            Err(LlmError::JsonModeUnsupported(message)) => {
                warn!("Provider rejected JSON mode ({message}), retrying without response_format");
                self.send_with_retry(messages, &options, false).await?
            }
            other => other?,
        };

        if let Some(usage) = &response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }

    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn send_with_retry(
        &self,
        messages: &[ChatMessage<'_>],
        options: &CallOptions,
        json_mode: bool,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: json_mode.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let url = format!("{}/chat/completions", self.base_url);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: base, 2x base
                let delay = self.retry_base * (1 << (attempt - 1));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .header("HTTP-Referer", &self.referer)
                .header("X-Title", "SkillSync AI")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                warn!("LLM API rate limited (429)");
                last_error = Some(LlmError::RateLimited {
                    retries: MAX_RETRIES,
                });
                continue;
            }

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, preview(&body));
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: preview(&body),
                });
                continue;
            }

            match status {
                StatusCode::UNAUTHORIZED => return Err(LlmError::InvalidKey),
                StatusCode::PAYMENT_REQUIRED => return Err(LlmError::InsufficientCredits),
                _ => {}
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| preview(&e.error.message))
                    .unwrap_or_else(|_| preview(&body));
                // Providers behind OpenRouter nest the real reason under error.metadata.raw
                if json_mode
                    && status == StatusCode::BAD_REQUEST
                    && is_response_format_rejection(&body)
                {
                    return Err(LlmError::JsonModeUnsupported(message));
                }
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json::<ChatResponse>().await?);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
impl LlmClient {
    /// Client with a short backoff for exercising the retry path.
    pub fn for_tests(config: &Config) -> Self {
        let mut client = Self::new(config).expect("client builds");
        client.retry_base = Duration::from_millis(5);
        client
    }
}

fn is_response_format_rejection(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("response_format") || lower.contains("json_object") || lower.contains("json mode")
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
}

/// Parses an LLM reply as JSON.
///
/// Strips markdown code fences; if the remainder still fails to parse, retries on the
/// outermost `{ ... }` span so leading or trailing chatter is tolerated.
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let text = strip_json_fences(text);

    match serde_json::from_str(text) {
        Ok(v) => Ok(v),
        Err(first_err) => match outermost_object(text) {
            Some(span) if span.len() < text.len() => {
                serde_json::from_str(span).map_err(LlmError::Parse)
            }
            _ => Err(LlmError::Parse(first_err)),
        },
    }
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let opened = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"));

    match opened {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim()),
        None => text,
    }
}
