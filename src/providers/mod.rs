// LLM provider abstraction
//
// The analyzer talks to the external model only through `LlmProvider`, so the
// client is constructed explicitly and can be swapped for a test double.

use async_trait::async_trait;

pub mod factory;
pub mod gemini;
pub mod types;

pub use factory::create_provider;
pub use gemini::GeminiProvider;
pub use types::{GenerationRequest, ProviderError};

/// Trait for text generation providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one request and return the raw response text
    ///
    /// No retries; a failure is reported once and handled by the caller.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;

    /// Provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Model used for requests
    fn model(&self) -> &str;
}
