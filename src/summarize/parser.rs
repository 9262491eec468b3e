//! Validation of raw model output into a [`SummaryResult`].

use serde_json::Value;
use thiserror::Error;

use crate::models::SummaryResult;

/// Model output that does not satisfy the summary contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("invalid JSON response from LLM: {0}")]
    Malformed(String),

    #[error("Missing or invalid '{field}' field")]
    SchemaViolation { field: &'static str },
}

/// Parse and validate a raw model response.
///
/// A surrounding markdown code fence (optionally tagged, e.g. ```` ```json ````)
/// is stripped first. `summary` and `structure` must be strings and
/// `technologies` an array of strings; any other fields are dropped.
pub fn parse_response(raw: &str) -> Result<SummaryResult, ResponseError> {
    let text = strip_code_fence(raw);
    let data: Value =
        serde_json::from_str(text).map_err(|e| ResponseError::Malformed(e.to_string()))?;

    let summary = string_field(&data, "summary")?;
    let technologies = data
        .get("technologies")
        .and_then(Value::as_array)
        .ok_or(ResponseError::SchemaViolation {
            field: "technologies",
        })?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(ResponseError::SchemaViolation {
            field: "technologies",
        })?;
    let structure = string_field(&data, "structure")?;

    Ok(SummaryResult {
        summary,
        technologies,
        structure,
    })
}

fn string_field(data: &Value, field: &'static str) -> Result<String, ResponseError> {
    data.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ResponseError::SchemaViolation { field })
}

/// Remove an opening fence line and a matching closing fence.
fn strip_code_fence(raw: &str) -> &str {
    let text = raw.trim();
    if !text.starts_with("```") {
        return text;
    }
    let body = match text.split_once('\n') {
        Some((_, rest)) => rest,
        None => &text[3..],
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}
