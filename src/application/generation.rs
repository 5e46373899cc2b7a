//! Drafting post bodies through a third-party language model.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

pub const METRIC_GENERATION_REQUESTS: &str = "postline_generation_requests_total";
pub const METRIC_GENERATION_MS: &str = "postline_generation_ms";

/// Instruction sent ahead of every user prompt.
pub const SYSTEM_PROMPT: &str = "You are a professional blog writer. Generate well-structured, engaging blog content in Japanese.";

/// Prompt the admin form sends when asked to draft a body from a title.
pub fn title_prompt(title: &str) -> String {
    format!("以下のタイトルでブログ記事を書いてください: {title}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown provider `{0}`")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("prompt is required")]
    MissingPrompt,
    #[error("{} API key not configured", .0.display_name())]
    MissingCredential(Provider),
    #[error("{provider} returned an unusable response: {message}")]
    Upstream { provider: Provider, message: String },
    #[error("request to {provider} failed: {message}")]
    Transport { provider: Provider, message: String },
}

impl GenerationError {
    fn outcome(&self) -> &'static str {
        match self {
            GenerationError::MissingPrompt => "missing_prompt",
            GenerationError::MissingCredential(_) => "missing_credential",
            GenerationError::Upstream { .. } => "upstream_error",
            GenerationError::Transport { .. } => "transport_error",
        }
    }
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedContent {
    pub content: String,
    pub provider: Provider,
}

/// Routes prompts to whichever provider clients are configured.
#[derive(Clone, Default)]
pub struct GenerationGateway {
    openai: Option<Arc<dyn ContentGenerator>>,
    anthropic: Option<Arc<dyn ContentGenerator>>,
}

impl GenerationGateway {
    pub fn new(
        openai: Option<Arc<dyn ContentGenerator>>,
        anthropic: Option<Arc<dyn ContentGenerator>>,
    ) -> Self {
        Self { openai, anthropic }
    }

    fn client(&self, provider: Provider) -> Option<&Arc<dyn ContentGenerator>> {
        match provider {
            Provider::OpenAi => self.openai.as_ref(),
            Provider::Anthropic => self.anthropic.as_ref(),
        }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        provider: Provider,
    ) -> Result<GeneratedContent, GenerationError> {
        let started_at = Instant::now();
        let result = self.dispatch(prompt, provider).await;

        let outcome = match &result {
            Ok(_) => "ok",
            Err(err) => err.outcome(),
        };
        counter!(
            METRIC_GENERATION_REQUESTS,
            "provider" => provider.as_str(),
            "outcome" => outcome
        )
        .increment(1);
        histogram!(METRIC_GENERATION_MS, "provider" => provider.as_str())
            .record(started_at.elapsed().as_secs_f64() * 1000.0);

        match &result {
            Ok(generated) => info!(
                target: "postline::generation",
                provider = provider.as_str(),
                chars = generated.content.chars().count(),
                "content generated"
            ),
            Err(err) => warn!(
                target: "postline::generation",
                provider = provider.as_str(),
                outcome,
                error = %err,
                "content generation failed"
            ),
        }

        result
    }

    async fn dispatch(
        &self,
        prompt: &str,
        provider: Provider,
    ) -> Result<GeneratedContent, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::MissingPrompt);
        }

        let client = self
            .client(provider)
            .ok_or(GenerationError::MissingCredential(provider))?;
        let content = client.generate(prompt).await?;

        Ok(GeneratedContent { content, provider })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(Provider, &'static str);

    #[async_trait]
    impl ContentGenerator for Canned {
        fn provider(&self) -> Provider {
            self.0
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            Ok(format!("{}: {prompt}", self.1))
        }
    }

    #[test]
    fn provider_parses_known_names_only() {
        assert_eq!("openai".parse(), Ok(Provider::OpenAi));
        assert_eq!("anthropic".parse(), Ok(Provider::Anthropic));
        assert_eq!(
            "OpenAI".parse::<Provider>(),
            Err(UnknownProvider("OpenAI".to_string()))
        );
        assert_eq!(Provider::default(), Provider::OpenAi);
    }

    #[test]
    fn missing_credential_message_names_provider() {
        assert_eq!(
            GenerationError::MissingCredential(Provider::Anthropic).to_string(),
            "Anthropic API key not configured"
        );
    }

    #[test]
    fn title_prompt_embeds_title() {
        assert_eq!(
            title_prompt("Rust入門"),
            "以下のタイトルでブログ記事を書いてください: Rust入門"
        );
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_before_dispatch() {
        let gateway = GenerationGateway::new(
            Some(Arc::new(Canned(Provider::OpenAi, "gpt"))),
            None,
        );
        let err = gateway
            .generate("   ", Provider::OpenAi)
            .await
            .expect_err("blank prompt");
        assert!(matches!(err, GenerationError::MissingPrompt));
    }

    #[tokio::test]
    async fn unconfigured_provider_reports_missing_credential() {
        let gateway = GenerationGateway::new(
            Some(Arc::new(Canned(Provider::OpenAi, "gpt"))),
            None,
        );
        let err = gateway
            .generate("Write about Rust", Provider::Anthropic)
            .await
            .expect_err("no anthropic client");
        assert!(matches!(
            err,
            GenerationError::MissingCredential(Provider::Anthropic)
        ));
    }

    #[tokio::test]
    async fn routes_to_requested_provider() {
        let gateway = GenerationGateway::new(
            Some(Arc::new(Canned(Provider::OpenAi, "gpt"))),
            Some(Arc::new(Canned(Provider::Anthropic, "claude"))),
        );
        let generated = gateway
            .generate("hello", Provider::Anthropic)
            .await
            .expect("generated");
        assert_eq!(generated.content, "claude: hello");
        assert_eq!(generated.provider, Provider::Anthropic);
    }
}
