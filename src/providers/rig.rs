//! rig-core integration for schema-constrained completions.
//!
//! Talks to any OpenAI-compatible chat completions endpoint (Nebius by
//! default) and asks for output conforming to the [`SummaryResult`]
//! JSON schema.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers;

use crate::config::ProviderConfig;
use crate::constants;
use crate::models::SummaryResult;

use super::{CompletionProvider, ProviderError};

/// rig-core based completion provider.
pub struct RigProvider {
    config: ProviderConfig,
}

impl RigProvider {
    /// Create a new RigProvider, failing when no credential is configured.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        if config.api_key.is_none() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key found. Set {} or {}.",
                constants::ENV_API_KEY,
                constants::ENV_NEBIUS_API_KEY
            )));
        }
        Ok(Self { config })
    }

    /// Get the API key or return an error.
    fn api_key(&self) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("missing API key".to_string()))
    }

    /// Build an OpenAI-style chat completions client for the configured base URL.
    fn build_client(&self) -> Result<providers::openai::CompletionsClient, ProviderError> {
        providers::openai::CompletionsClient::builder()
            .api_key(self.api_key()?)
            .base_url(&self.config.base_url)
            .build()
            .map_err(|e| ProviderError::ApiError(format!("failed to create client: {e}")))
    }
}

#[async_trait]
impl CompletionProvider for RigProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, system_prompt: &str, content: &str) -> Result<String, ProviderError> {
        let client = self.build_client()?;
        let agent = client
            .agent(&self.config.model)
            .preamble(system_prompt)
            .temperature(0.0)
            .max_tokens(self.config.max_tokens)
            .output_schema::<SummaryResult>()
            .build();
        agent.prompt(content).await.map_err(|e| {
            ProviderError::ApiError(format!("{} completion error: {e}", self.config.model))
        })
    }
}
