//! CompletionProvider trait and LLM integration.
//!
//! Provides an abstraction layer over rig-core so the summarization
//! pipeline can run against a test double.

pub mod rig;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the completion provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM API error: {0}")]
    ApiError(String),

    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

/// A completion service constrained to the summary JSON schema.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model identifier, recorded alongside cached responses.
    fn model(&self) -> &str;

    /// Send one system instruction and one user message; return the raw
    /// response text.
    async fn complete(&self, system_prompt: &str, content: &str) -> Result<String, ProviderError>;
}
