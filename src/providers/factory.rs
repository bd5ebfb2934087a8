// Provider factory
//
// Creates the analysis provider based on configuration

use anyhow::{bail, Result};
use std::sync::Arc;
use std::time::Duration;

use super::gemini::GeminiProvider;
use super::LlmProvider;
use crate::config::ProviderConfig;

/// Create a provider based on the provider configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn LlmProvider>> {
    match config.provider.as_str() {
        "gemini" => {
            if config.api_key.is_empty() {
                tracing::warn!("No Gemini API key configured; every request will use the fallback report");
            }

            let mut provider = GeminiProvider::with_timeout(
                config.api_key.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(Arc::new(provider))
        }
        other => bail!("Unknown provider: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gemini_provider() {
        let config = ProviderConfig {
            api_key: "test-key".to_string(),
            model: Some("gemini-1.5-pro".to_string()),
            ..ProviderConfig::default()
        };

        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-1.5-pro");
    }

    #[test]
    fn test_missing_key_still_creates_provider() {
        let provider = create_provider(&ProviderConfig::default());
        assert!(provider.is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        let config = ProviderConfig {
            provider: "unknown".to_string(),
            ..ProviderConfig::default()
        };

        assert!(create_provider(&config).is_err());
    }
}
