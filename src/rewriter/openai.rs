//! OpenAI-compatible chat-completions backend for [`Rewriter`].
//!
//! The instruction goes out as the system message and the text as the user
//! message. Any endpoint speaking the same wire format (a local proxy, a
//! hosted gateway) works by changing `api_url`.

use super::{RewriteError, RewriteResult, Rewriter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MODEL_ENV: &str = "OPENAI_MODEL";
pub const API_URL_ENV: &str = "OPENAI_BASE_URL";

#[derive(Debug, Clone)]
pub struct RewriterConfig {
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            // generation over a whole paragraph can take well over a minute
            timeout: Duration::from_secs(120),
        }
    }
}

impl RewriterConfig {
    /// Defaults overridden by `OPENAI_MODEL` and `OPENAI_BASE_URL` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = env::var(MODEL_ENV) {
            config.model = model;
        }
        if let Ok(url) = env::var(API_URL_ENV) {
            config.api_url = url;
        }
        config
    }
}

pub struct OpenAiRewriter {
    config: RewriterConfig,
    api_key: String,
    http: reqwest::Client,
}

impl OpenAiRewriter {
    pub fn new(config: RewriterConfig, api_key: impl Into<String>) -> RewriteResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RewriteError::MissingApiKey { env_var: API_KEY_ENV.to_string() });
        }

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, api_key, http })
    }

    /// Build from `OPENAI_API_KEY` plus the given config
    pub fn from_env(config: RewriterConfig) -> RewriteResult<Self> {
        let api_key = env::var(API_KEY_ENV)
            .map_err(|_| RewriteError::MissingApiKey { env_var: API_KEY_ENV.to_string() })?;
        Self::new(config, api_key)
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Rewriter for OpenAiRewriter {
    async fn rewrite(&self, text: &str, instruction: &str, creativity: f32) -> RewriteResult<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: instruction },
                ChatMessage { role: "user", content: text },
            ],
            temperature: creativity,
            max_tokens: self.config.max_tokens,
        };

        debug!(model = %self.config.model, creativity, input_chars = text.chars().count(), "Sending rewrite request");

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Rewrite request rejected");
            return Err(RewriteError::Api { status: status.as_u16(), message });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::Parse(e.to_string()))?;

        extract_content(parsed)
    }
}

fn extract_content(response: ChatResponse) -> RewriteResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(RewriteError::EmptyResponse)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}
