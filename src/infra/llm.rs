//! HTTP clients for the supported language model providers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::application::generation::{ContentGenerator, GenerationError, Provider, SYSTEM_PROMPT};

use super::error::InfraError;

pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_TEMPERATURE: f32 = 0.7;
const ANTHROPIC_MAX_TOKENS: u32 = 4096;

fn user_agent() -> &'static str {
    concat!("postline/", env!("CARGO_PKG_VERSION"))
}

fn build_client(timeout: Duration) -> Result<Client, InfraError> {
    Client::builder()
        .user_agent(user_agent())
        .timeout(timeout)
        .build()
        .map_err(|err| InfraError::configuration(format!("failed to build HTTP client: {err}")))
}

/// Resolves `path` under `base`, keeping any path prefix the base carries.
fn endpoint(base: &Url, path: &str) -> Result<Url, InfraError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    base.join(path)
        .map_err(|err| InfraError::configuration(format!("invalid provider URL `{base}`: {err}")))
}

fn transport(provider: Provider, err: reqwest::Error) -> GenerationError {
    GenerationError::Transport {
        provider,
        message: err.to_string(),
    }
}

fn upstream(provider: Provider, message: impl Into<String>) -> GenerationError {
    GenerationError::Upstream {
        provider,
        message: message.into(),
    }
}

async fn read_json<T: for<'de> Deserialize<'de>>(
    provider: Provider,
    response: reqwest::Response,
) -> Result<T, GenerationError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| transport(provider, err))?;
    if !status.is_success() {
        let text = String::from_utf8_lossy(&bytes).into_owned();
        return Err(upstream(provider, format!("status {status} body {text}")));
    }
    serde_json::from_slice(&bytes)
        .map_err(|err| upstream(provider, format!("failed to parse body: {err}")))
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'static str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Clone, Debug)]
pub struct OpenAiClient {
    client: Client,
    url: Url,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base: &Url, api_key: String, timeout: Duration) -> Result<Self, InfraError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: endpoint(base, "v1/chat/completions")?,
            api_key,
        })
    }
}

#[async_trait]
impl ContentGenerator for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = ChatCompletionRequest {
            model: OPENAI_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: OPENAI_TEMPERATURE,
        };

        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| transport(Provider::OpenAi, err))?;

        let parsed: ChatCompletionResponse = read_json(Provider::OpenAi, response).await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| upstream(Provider::OpenAi, "response contained no choices"))
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: &'static str,
    max_tokens: u32,
    messages: Vec<MessagesTurn>,
}

#[derive(Debug, Serialize)]
struct MessagesTurn {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<MessagesBlock>,
}

#[derive(Debug, Deserialize)]
struct MessagesBlock {
    text: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AnthropicClient {
    client: Client,
    url: Url,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(base: &Url, api_key: String, timeout: Duration) -> Result<Self, InfraError> {
        Ok(Self {
            client: build_client(timeout)?,
            url: endpoint(base, "v1/messages")?,
            api_key,
        })
    }
}

#[async_trait]
impl ContentGenerator for AnthropicClient {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = MessagesRequest {
            model: ANTHROPIC_MODEL,
            max_tokens: ANTHROPIC_MAX_TOKENS,
            messages: vec![MessagesTurn {
                role: "user",
                content: format!("{SYSTEM_PROMPT}\n\n{prompt}"),
            }],
        };

        let response = self
            .client
            .post(self.url.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|err| transport(Provider::Anthropic, err))?;

        let parsed: MessagesResponse = read_json(Provider::Anthropic, response).await?;
        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| upstream(Provider::Anthropic, "response contained no text block"))
    }
}
