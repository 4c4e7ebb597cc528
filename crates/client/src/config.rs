//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_API_URL` - Base URL of the shop backend API
//!   (e.g., <http://localhost:8000/api/>)
//!
//! ## Optional
//! - `SHOPFRONT_DATA_DIR` - Directory for persisted session and cart state
//!   (default: `.shopfront`)
//! - `SHOPFRONT_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".shopfront";
const DEFAULT_TIMEOUT_SECS: &str = "30";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopfront client configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Base URL of the shop backend API. Always ends with a trailing slash so
    /// relative endpoint paths join onto it cleanly.
    pub api_url: Url,
    /// Directory holding persisted session and cart state.
    pub data_dir: PathBuf,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `SHOPFRONT_API_URL` is missing or not a valid
    /// base URL, or if `SHOPFRONT_TIMEOUT_SECS` is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_base_url("SHOPFRONT_API_URL", &get_required_env("SHOPFRONT_API_URL")?)?;
        let data_dir = PathBuf::from(get_env_or_default("SHOPFRONT_DATA_DIR", DEFAULT_DATA_DIR));
        let timeout_secs = get_env_or_default("SHOPFRONT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_url,
            data_dir,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a base URL, normalizing it to end with a trailing slash.
///
/// The trailing slash matters twice: relative endpoint paths join onto the
/// base without clobbering its path segment, and the bearer-injection check
/// compares outgoing request URLs against this exact prefix.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };

    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "not a usable base URL".to_string(),
        ));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gains_trailing_slash() {
        let url = parse_base_url("TEST", "http://localhost:8000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn test_base_url_keeps_trailing_slash() {
        let url = parse_base_url("TEST", "http://localhost:8000/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        let result = parse_base_url("TEST", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_base_url_rejects_non_base_scheme() {
        let result = parse_base_url("TEST", "mailto:shop@example.com");
        assert!(result.is_err());
    }
}
