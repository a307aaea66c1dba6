//! Turns the model's free-text answer into an `AnalysisResult`.
//!
//! Recovery is three-tier: direct JSON parse of the fence-stripped text, then
//! the first `{...}` block found in it, then an explicit non-JSON failure.
//! The model's output format is never trusted beyond that.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::screening::models::AnalysisResult;

/// First `{` through the last `}` that ends a line (LF or CRLF).
static OBJECT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?msR)\{.*\}$").expect("valid regex"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("AI returned non-JSON content")]
    NonJson,

    #[error("Not an object")]
    NotAnObject,

    #[error("{field} must be a number")]
    NotNumeric { field: &'static str },
}

/// Parses and validates raw model output in one step.
pub fn sanitize_model_output(raw: &str) -> Result<AnalysisResult, SanitizeError> {
    let value = parse_lenient(raw)?;
    validate_analysis(&value)
}

/// Strips a leading ```` ``` ````/```` ```json ```` marker and a trailing
/// ```` ``` ```` marker, each independently.
pub fn strip_json_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

pub fn parse_lenient(raw: &str) -> Result<Value, SanitizeError> {
    let cleaned = strip_json_fences(raw);

    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        return Ok(value);
    }

    OBJECT_BLOCK
        .find(cleaned)
        .and_then(|block| serde_json::from_str::<Value>(block.as_str()).ok())
        .ok_or(SanitizeError::NonJson)
}

pub fn validate_analysis(value: &Value) -> Result<AnalysisResult, SanitizeError> {
    let obj = value.as_object().ok_or(SanitizeError::NotAnObject)?;

    let score = obj
        .get("score")
        .and_then(Value::as_f64)
        .ok_or(SanitizeError::NotNumeric { field: "score" })?;

    Ok(AnalysisResult {
        score: score.round().clamp(0.0, 100.0) as u32,
        strengths: normalize_list(obj.get("strengths")),
        missing_skills: normalize_list(obj.get("missingSkills")),
        suggestions: normalize_list(obj.get("suggestions")),
    })
}

/// Non-lists become empty; nulls and blank entries are dropped; everything
/// else is stringified and trimmed.
fn normalize_list(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s.trim().to_string()),
            other => Some(other.to_string().trim().to_string()),
        })
        .filter(|s| !s.is_empty())
        .collect()
}
