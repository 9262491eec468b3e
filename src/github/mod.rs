//! GitHub tree and raw-content fetching.
//!
//! [`RepoSource`] is the seam between content assembly and the network so
//! the pipeline can be driven by test doubles. [`GithubClient`] is the
//! reqwest-backed implementation.

pub mod url;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::GithubConfig;
use crate::constants::{TRUNCATION_MARKER, USER_AGENT};
use crate::models::{EntryKind, FileEntry, RepoRef};

/// Errors from the repository tree or content provider.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("repository {0} not found")]
    NotFound(String),

    #[error("access to {0} denied or rate limited")]
    AccessDenied(String),

    #[error("GitHub returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
}

/// Source of repository trees and file contents.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// List every blob (file) entry in the repository's default branch.
    async fn fetch_tree(&self, repo: &RepoRef) -> Result<Vec<FileEntry>, FetchError>;

    /// Fetch one file's text. `Ok(None)` means the file is unavailable.
    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<Option<String>, FetchError>;
}

#[derive(Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<FileEntry>,
    #[serde(default)]
    truncated: bool,
}

/// reqwest-backed GitHub client.
pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    raw_url: String,
    tree_timeout: Duration,
    file_timeout: Duration,
    max_file_bytes: usize,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request {
                url: config.api_url.clone(),
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            raw_url: config.raw_url.trim_end_matches('/').to_string(),
            tree_timeout: Duration::from_secs(config.tree_timeout_secs),
            file_timeout: Duration::from_secs(config.file_timeout_secs),
            max_file_bytes: config.max_file_bytes,
        })
    }

    fn tree_url(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/HEAD?recursive=1",
            self.api_url, repo.owner, repo.repo
        )
    }

    /// Raw-content URL with each path segment percent-encoded.
    fn raw_file_url(&self, repo: &RepoRef, path: &str) -> Result<::url::Url, FetchError> {
        let mut url = ::url::Url::parse(&self.raw_url).map_err(|e| FetchError::Request {
            url: self.raw_url.clone(),
            message: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Request {
                url: self.raw_url.clone(),
                message: "raw content URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend([repo.owner.as_str(), repo.repo.as_str(), "HEAD"])
            .extend(path.split('/'));
        Ok(url)
    }
}

#[async_trait]
impl RepoSource for GithubClient {
    async fn fetch_tree(&self, repo: &RepoRef) -> Result<Vec<FileEntry>, FetchError> {
        let url = self.tree_url(repo);
        let resp = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .timeout(self.tree_timeout)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.clone(),
                message: e.to_string(),
            })?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound(repo.to_string())),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                return Err(FetchError::AccessDenied(repo.to_string()));
            }
            status if !status.is_success() => {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    url,
                });
            }
            _ => {}
        }

        let body: TreeResponse = resp.json().await.map_err(|e| FetchError::Request {
            url: url.clone(),
            message: format!("failed to decode tree response: {e}"),
        })?;

        if body.truncated {
            tracing::warn!(repo = %repo, "GitHub truncated the recursive tree listing");
        }

        Ok(body
            .tree
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::Blob)
            .collect())
    }

    async fn fetch_file(&self, repo: &RepoRef, path: &str) -> Result<Option<String>, FetchError> {
        let url = self.raw_file_url(repo, path)?;
        let resp = self
            .http
            .get(url.clone())
            .timeout(self.file_timeout)
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if resp.status() != StatusCode::OK {
            tracing::debug!(path, status = resp.status().as_u16(), "file unavailable");
            return Ok(None);
        }

        let bytes = resp.bytes().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Some(cap_file_body(&bytes, self.max_file_bytes)))
    }
}

/// Decode a raw body, truncating oversized files to `max_bytes` characters
/// plus a truncation marker.
fn cap_file_body(bytes: &[u8], max_bytes: usize) -> String {
    let text = String::from_utf8_lossy(bytes);
    if bytes.len() <= max_bytes {
        return text.into_owned();
    }
    let mut capped: String = text.chars().take(max_bytes).collect();
    capped.push_str(TRUNCATION_MARKER);
    capped
}
