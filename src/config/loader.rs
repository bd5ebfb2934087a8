// Configuration loader
// Loads ~/.mindcheck/config.toml (or $MINDCHECK_CONFIG), then applies
// environment variable overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::settings::Config;

/// Load configuration from the config file and environment
pub fn load_config() -> Result<Config> {
    let mut config = match config_path() {
        Some(path) if path.exists() => load_from_file(&path)?,
        _ => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("MINDCHECK_CONFIG") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::home_dir().map(|home| home.join(".mindcheck/config.toml"))
}

/// Parse a TOML config file
pub fn load_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(config)
}

/// Apply environment overrides using the given lookup
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(api_key) = get("GEMINI_API_KEY") {
        config.provider.api_key = api_key;
    }
    if let Some(model) = get("GEMINI_MODEL") {
        config.provider.model = Some(model);
    }
    if let Some(timeout) = get("GEMINI_TIMEOUT_SECS") {
        config.provider.timeout_secs = parse_var("GEMINI_TIMEOUT_SECS", &timeout)?;
    }

    if let Some(bind) = get("BIND_ADDRESS") {
        config.server.bind_address = bind;
    } else if let Some(port) = get("PORT") {
        let port: u16 = parse_var("PORT", &port)?;
        config.server.bind_address = format!("0.0.0.0:{}", port);
    }
    if let Some(origins) = get("CORS_ORIGIN") {
        config.server.cors_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }
    if let Some(window) = get("RATE_LIMIT_WINDOW_MS") {
        config.server.rate_limit_window_ms = parse_var("RATE_LIMIT_WINDOW_MS", &window)?;
    }
    if let Some(max) = get("RATE_LIMIT_MAX_REQUESTS") {
        config.server.rate_limit_max_requests = parse_var("RATE_LIMIT_MAX_REQUESTS", &max)?;
    }

    if let Some(path) = get("CRISIS_KEYWORDS_PATH") {
        config.crisis_keywords_path = Some(PathBuf::from(path));
    }

    Ok(())
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {}: {:?}", key, value))
}
