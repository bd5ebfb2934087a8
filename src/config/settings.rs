// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External analysis provider
    pub provider: ProviderConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Optional JSON file with extra crisis keywords per language
    pub crisis_keywords_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider name (only "gemini" is supported)
    pub provider: String,

    /// API key; empty means every request uses the fallback report
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Model override
    pub model: Option<String>,

    /// API host override
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            api_key: String::new(),
            model: None,
            base_url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,

    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,

    /// Rate limit window in milliseconds
    pub rate_limit_window_ms: u64,

    /// Requests allowed per client per window on /api routes
    pub rate_limit_max_requests: u32,

    /// Maximum accepted request body in bytes
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            rate_limit_window_ms: 900_000,
            rate_limit_max_requests: 10,
            body_limit_bytes: 10 * 1024,
        }
    }
}
