// Model output parsing
//
// Strips optional markdown code fences and strictly validates the result
// against the AnalysisResult shape.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::types::AnalysisResult;
use crate::providers::ProviderError;

static OPENING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*```(?:json)?[ \t]*\r?\n?").expect("Failed to compile opening fence regex")
});

static CLOSING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r?\n?```\s*$").expect("Failed to compile closing fence regex")
});

/// Why no model-produced candidate is available
///
/// Every variant routes to the fallback report; they are kept apart so the
/// logs can tell an unreachable service from a misbehaving one.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analysis service unavailable: {0}")]
    Unavailable(#[from] ProviderError),

    #[error("failed to build analysis prompt: {0}")]
    Prompt(#[source] serde_json::Error),

    #[error("model output is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("model output does not match the analysis shape: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

impl AnalysisError {
    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Unavailable(_) => "unavailable",
            AnalysisError::Prompt(_) => "prompt",
            AnalysisError::Parse(_) => "parse",
            AnalysisError::InvalidShape(_) => "invalid_shape",
        }
    }
}

/// Remove a leading ```json (or bare ```) fence and a trailing ``` fence
pub fn strip_code_fences(text: &str) -> String {
    let without_open = OPENING_FENCE.replace(text, "");
    let without_close = CLOSING_FENCE.replace(&without_open, "");
    without_close.trim().to_string()
}

/// Parse raw model text into a schema-valid AnalysisResult
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let cleaned = strip_code_fences(text);

    let value: Value = serde_json::from_str(&cleaned).map_err(AnalysisError::Parse)?;

    serde_json::from_value(value).map_err(AnalysisError::InvalidShape)
}
