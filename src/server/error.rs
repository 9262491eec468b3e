//! Request-level error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::github::url::UrlError;
use crate::github::FetchError;
use crate::summarize::{ResponseError, SummarizeError};

/// Every way a summarize request can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Repository not found (may be private or does not exist)")]
    NotFound,

    #[error("GitHub API rate limit exceeded or access denied")]
    AccessDenied,

    #[error("Failed to fetch repository: {0}")]
    FetchFailure(String),

    #[error("{0}")]
    ConfigError(String),

    #[error("LLM returned invalid JSON response")]
    MalformedResponse,

    #[error("LLM response failed validation: Missing or invalid '{0}' field")]
    SchemaViolation(&'static str),

    #[error("LLM summarization failed: {0}")]
    UpstreamError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::AccessDenied => StatusCode::FORBIDDEN,
            ApiError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::FetchFailure(_)
            | ApiError::MalformedResponse
            | ApiError::SchemaViolation(_)
            | ApiError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// JSON envelope for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<UrlError> for ApiError {
    fn from(err: UrlError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(_) => ApiError::NotFound,
            FetchError::AccessDenied(_) => ApiError::AccessDenied,
            other => ApiError::FetchFailure(other.to_string()),
        }
    }
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::NotConfigured(msg) => ApiError::ConfigError(msg),
            SummarizeError::Upstream(msg) => ApiError::UpstreamError(msg),
            SummarizeError::Response(ResponseError::Malformed(_)) => ApiError::MalformedResponse,
            SummarizeError::Response(ResponseError::SchemaViolation { field }) => {
                ApiError::SchemaViolation(field)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (ApiError::InvalidInput("bad".into()), 400),
            (ApiError::NotFound, 404),
            (ApiError::AccessDenied, 403),
            (ApiError::FetchFailure("x".into()), 502),
            (ApiError::ConfigError("x".into()), 500),
            (ApiError::MalformedResponse, 502),
            (ApiError::SchemaViolation("summary"), 502),
            (ApiError::UpstreamError("x".into()), 502),
        ];
        for (err, code) in cases {
            assert_eq!(err.status().as_u16(), code, "{err:?}");
        }
    }

    #[test]
    fn fetch_errors_map_to_taxonomy() {
        assert!(matches!(
            ApiError::from(FetchError::NotFound("a/b".into())),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(FetchError::AccessDenied("a/b".into())),
            ApiError::AccessDenied
        ));
        let err = ApiError::from(FetchError::Status {
            status: 500,
            url: "u".into(),
        });
        assert!(matches!(err, ApiError::FetchFailure(_)));
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn schema_violation_names_field() {
        let err = ApiError::from(SummarizeError::Response(ResponseError::SchemaViolation {
            field: "technologies",
        }));
        assert!(err.to_string().contains("'technologies'"));
    }

    #[test]
    fn url_errors_are_invalid_input() {
        let err = ApiError::from(UrlError::NotGithub("https://gitlab.com/a/b".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Not a GitHub URL"));
    }
}
