//! Configuration management for the verification client
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_ORACLE_URL: &str = "http://localhost:3003";
pub const DEFAULT_BIOMETRIC_API_URL: &str = "http://system-api:3000";
pub const DEFAULT_VAULT_KEY_ID: &str = "vault-key";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the oracle serving the KYC and ZKP endpoints
    pub oracle_url: String,

    /// Origin of the API serving biometric verification
    pub biometric_api_url: String,

    /// Key id handed to the encryption provider for upload filenames
    pub vault_key_id: String,

    /// Request timeout; the HTTP client's default applies when unset
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            oracle_url: DEFAULT_ORACLE_URL.to_string(),
            biometric_api_url: DEFAULT_BIOMETRIC_API_URL.to_string(),
            vault_key_id: DEFAULT_VAULT_KEY_ID.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load and validate configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self::load_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Read environment variables without validating the origins, so callers
    /// can apply overrides first
    pub fn load_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(secs) => Some(Duration::from_secs(
                secs.parse().context("Invalid REQUEST_TIMEOUT_SECS")?,
            )),
            Err(_) => None,
        };

        let config = ClientConfig {
            oracle_url: env::var("ORACLE_URL")
                .unwrap_or_else(|_| DEFAULT_ORACLE_URL.to_string()),

            biometric_api_url: env::var("BIOMETRIC_API_URL")
                .unwrap_or_else(|_| DEFAULT_BIOMETRIC_API_URL.to_string()),

            vault_key_id: env::var("VAULT_KEY_ID")
                .unwrap_or_else(|_| DEFAULT_VAULT_KEY_ID.to_string()),

            request_timeout,
        }
        .normalized();

        Ok(config)
    }

    /// Strip trailing slashes so endpoint paths can be appended directly
    pub fn normalized(mut self) -> Self {
        self.oracle_url = self.oracle_url.trim_end_matches('/').to_string();
        self.biometric_api_url = self.biometric_api_url.trim_end_matches('/').to_string();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        check_origin("ORACLE_URL", &self.oracle_url)?;
        check_origin("BIOMETRIC_API_URL", &self.biometric_api_url)?;

        if self.request_timeout == Some(Duration::ZERO) {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }

        Ok(())
    }

    pub fn oracle_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.oracle_url, path)
    }

    pub fn biometric_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.biometric_api_url, path)
    }
}

fn check_origin(name: &str, origin: &str) -> Result<()> {
    if origin.is_empty() {
        anyhow::bail!("{} must not be empty", name);
    }

    if !(origin.starts_with("http://") || origin.starts_with("https://")) {
        anyhow::bail!("{} must start with http:// or https://, got {}", name, origin);
    }

    Ok(())
}
