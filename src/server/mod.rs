//! HTTP surface: `POST /summarize` and a health probe.

pub mod error;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::config::ContentLimits;
use crate::context;
use crate::github::url::parse_github_url;
use crate::github::{FetchError, RepoSource};
use crate::models::{RepoRef, SummaryResult};
use crate::summarize::Summarizer;

pub use error::{ApiError, ErrorBody};

/// Process-lifetime collaborators shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RepoSource>,
    pub summarizer: Arc<Summarizer>,
    pub limits: ContentLimits,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Fetch, assemble and summarize the repository named in the body.
///
/// The body is read as raw bytes so a missing or non-JSON payload is
/// reported through the error envelope instead of a framework rejection.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn summarize(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SummaryResult>, ApiError> {
    let github_url = extract_github_url(&body).inspect_err(|e| {
        tracing::warn!("Invalid request: {e}");
    })?;
    tracing::info!(github_url = %github_url, "summarize request");

    let repo = parse_github_url(&github_url).inspect_err(|e| {
        tracing::warn!("Invalid github_url: {e}");
    })?;

    let content = fetch_content(&state, &repo)
        .await
        .inspect_err(|e| tracing::warn!("Failed to fetch repo: {e}"))?;
    tracing::info!(chars = content.chars().count(), "fetched repo content");

    let result = state
        .summarizer
        .summarize(&content)
        .await
        .inspect_err(|e| tracing::warn!("LLM summarization failed: {e}"))?;

    tracing::info!(repo = %repo, "summarization complete");
    Ok(Json(result))
}

async fn fetch_content(state: &AppState, repo: &RepoRef) -> Result<String, FetchError> {
    let entries = state.source.fetch_tree(repo).await?;
    context::build_repo_content(repo, &entries, state.source.as_ref(), state.limits).await
}

/// Pull a non-empty `github_url` string out of a JSON object body.
fn extract_github_url(body: &[u8]) -> Result<String, ApiError> {
    let missing = || {
        ApiError::InvalidInput("Missing or invalid 'github_url' in request body".to_string())
    };

    let value: Value = serde_json::from_slice(body).map_err(|_| missing())?;
    let url = value
        .get("github_url")
        .and_then(Value::as_str)
        .ok_or_else(missing)?
        .trim();

    if url.is_empty() {
        return Err(ApiError::InvalidInput("'github_url' cannot be empty".to_string()));
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_trimmed_url() {
        let url = extract_github_url(br#"{"github_url":"  https://github.com/a/b  "}"#).unwrap();
        assert_eq!(url, "https://github.com/a/b");
    }

    #[test]
    fn rejects_missing_or_wrong_type() {
        for body in [
            &b""[..],
            b"not json",
            b"{}",
            br#"{"foo":"bar"}"#,
            br#"{"github_url":42}"#,
            br#"["https://github.com/a/b"]"#,
        ] {
            let err = extract_github_url(body).unwrap_err();
            assert!(err.to_string().contains("github_url"), "{err}");
        }
    }

    #[test]
    fn rejects_blank_url() {
        let err = extract_github_url(br#"{"github_url":"   "}"#).unwrap_err();
        assert_eq!(err.to_string(), "'github_url' cannot be empty");
    }
}
