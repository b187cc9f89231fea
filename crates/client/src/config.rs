//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JUNIPER_API_URL` - Base URL of the storefront API (e.g., `http://localhost:5000`)
//!
//! ## Optional
//! - `JUNIPER_STORAGE_DIR` - Directory for durable cart/session storage
//!   (default: `.juniper-market`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote storefront API.
    pub api_base_url: Url,
    /// Directory holding the durable key/value store.
    pub storage_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("JUNIPER_API_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("JUNIPER_API_URL".to_string(), e.to_string()))?;
        let storage_dir = PathBuf::from(get_env_or_default(
            "JUNIPER_STORAGE_DIR",
            ".juniper-market",
        ));

        Ok(Self {
            api_base_url,
            storage_dir,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
