//! GitHub repository URL parsing.

use thiserror::Error;
use url::Url;

use crate::models::RepoRef;

const GITHUB_HOSTS: [&str; 2] = ["github.com", "www.github.com"];

/// Rejected repository URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("Not a GitHub URL: {0}")]
    NotGithub(String),

    #[error("Cannot parse owner/repo from: {0}")]
    MissingSegments(String),
}

/// Extract `(owner, repo)` from a GitHub repository URL.
///
/// Surrounding whitespace, one trailing `/` and a `.git` suffix are
/// ignored. Path segments after the repository name (branch, subpath)
/// are accepted and dropped.
pub fn parse_github_url(input: &str) -> Result<RepoRef, UrlError> {
    let mut url = input.trim();
    url = url.strip_suffix('/').unwrap_or(url);
    url = url.strip_suffix(".git").unwrap_or(url);

    let parsed = Url::parse(url).map_err(|_| UrlError::NotGithub(url.to_string()))?;
    match parsed.host_str() {
        Some(host) if GITHUB_HOSTS.contains(&host) => {}
        _ => return Err(UrlError::NotGithub(url.to_string())),
    }

    let mut segments = parsed
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty());

    match (segments.next(), segments.next()) {
        (Some(owner), Some(repo)) => Ok(RepoRef::new(owner, repo)),
        _ => Err(UrlError::MissingSegments(url.to_string())),
    }
}
