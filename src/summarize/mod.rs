//! Summary requests with fingerprint memoization.
//!
//! `summarize` computes a fingerprint of the assembled content, serves a
//! cached raw response when one exists, and otherwise makes exactly one
//! completion call and stores its raw text before validating it. Two
//! concurrent requests for the same fingerprint may both miss and both
//! call the model; the later write wins.

pub mod parser;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::cache::{self, CacheEngine};
use crate::models::SummaryResult;
use crate::providers::{CompletionProvider, ProviderError};

pub use parser::{parse_response, ResponseError};

/// Fixed instruction sent with every completion request.
pub const SYSTEM_PROMPT: &str = "\
You are a software project analyst. Given repository contents (directory tree and key files), \
produce a JSON object with exactly these fields:

- \"summary\": A clear, human-readable description of what the project does (2-4 sentences).
- \"technologies\": A JSON array of the main languages, frameworks, and libraries used.
- \"structure\": A brief description of how the project is organized (1-2 sentences).

Respond ONLY with valid JSON, no markdown fences, no extra text.";

/// Errors from the summarization step.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl From<ProviderError> for SummarizeError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => SummarizeError::NotConfigured(msg),
            ProviderError::ApiError(msg) => SummarizeError::Upstream(msg),
        }
    }
}

/// Cache-aware summary requester.
pub struct Summarizer {
    provider: Option<Arc<dyn CompletionProvider>>,
    cache: Arc<CacheEngine>,
    timeout: Duration,
}

impl Summarizer {
    /// `provider` is `None` when no credential is configured; cached
    /// responses are still served in that case.
    pub fn new(
        provider: Option<Arc<dyn CompletionProvider>>,
        cache: Arc<CacheEngine>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            timeout,
        }
    }

    /// Produce a validated summary for the assembled repository content.
    pub async fn summarize(&self, content: &str) -> Result<SummaryResult, SummarizeError> {
        let raw = self.raw_response(content).await?;
        Ok(parse_response(&raw)?)
    }

    async fn raw_response(&self, content: &str) -> Result<String, SummarizeError> {
        let key = cache::fingerprint(content);
        if let Some(cached) = self.cache_get(&key).await {
            tracing::info!(fingerprint = %key, "serving cached LLM response");
            return Ok(cached);
        }

        let provider = self.provider.as_ref().ok_or_else(|| {
            SummarizeError::NotConfigured("LLM API key is not configured".to_string())
        })?;

        tracing::info!(fingerprint = %key, model = provider.model(), "calling LLM");
        let raw = tokio::time::timeout(self.timeout, provider.complete(SYSTEM_PROMPT, content))
            .await
            .map_err(|_| {
                SummarizeError::Upstream(format!(
                    "LLM request timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;

        self.cache_put(key, raw.clone(), provider.model().to_string()).await;
        Ok(raw)
    }

    /// Cache lookup on the blocking pool; a failed task counts as a miss.
    async fn cache_get(&self, key: &str) -> Option<String> {
        let cache = Arc::clone(&self.cache);
        let key = key.to_string();
        tokio::task::spawn_blocking(move || cache.get(&key))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "cache lookup task failed");
                None
            })
    }

    async fn cache_put(&self, key: String, raw: String, model: String) {
        let cache = Arc::clone(&self.cache);
        if let Err(e) = tokio::task::spawn_blocking(move || cache.put(&key, &raw, &model)).await {
            tracing::warn!(error = %e, "cache write task failed");
        }
    }
}
