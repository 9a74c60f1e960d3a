//! Moresleep (submission system) configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::require_http_url;

/// Moresleep configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MoresleepConfig {
    /// Base URL of the moresleep API
    #[serde(default = "default_url")]
    pub url: String,

    /// Basic auth user (empty disables auth)
    #[serde(default)]
    pub user: String,

    /// Basic auth password
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl MoresleepConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check whether basic auth credentials are configured
    pub fn has_credentials(&self) -> bool {
        !self.user.is_empty() && !self.password.expose_secret().is_empty()
    }

    /// Validate moresleep configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_http_url(&self.url, "moresleep")?;
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for MoresleepConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            user: String::new(),
            password: empty_secret(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8082".to_string()
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_timeout() -> u64 {
    30
}
