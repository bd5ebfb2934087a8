// Provider request and error types

use serde::Serialize;
use thiserror::Error;

/// Sampling temperature used for every analysis request
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Output bound for every analysis request
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;

/// One-shot text generation request
///
/// Carries the language-selected system instructions and the user message
/// (serialized input plus target shape description).
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// The external service could not produce text
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} is not configured: missing API key")]
    NotConfigured { provider: String },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned no text")]
    EmptyResponse { provider: String },
}

impl ProviderError {
    /// True when the request hit the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Transport { source, .. } if source.is_timeout())
    }
}
