//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TALKS_INDEXER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use talks_indexer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod elasticsearch;
mod error;
mod moresleep;
mod server;
mod sync;

pub use elasticsearch::ElasticsearchConfig;
pub use error::{ConfigError, ValidationError};
pub use moresleep::MoresleepConfig;
pub use server::{Environment, ServerConfig};
pub use sync::SyncConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults that match a local development setup, so an
/// empty environment yields a usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Submission system connection
    #[serde(default)]
    pub moresleep: MoresleepConfig,

    /// Search engine connection and index names
    #[serde(default)]
    pub elasticsearch: ElasticsearchConfig,

    /// Reindex behavior
    #[serde(default)]
    pub sync: SyncConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TALKS_INDEXER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TALKS_INDEXER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TALKS_INDEXER__MORESLEEP__URL=...` -> `moresleep.url = ...`
    /// - `TALKS_INDEXER__ELASTICSEARCH__PUBLIC_INDEX=...` -> `elasticsearch.public_index = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TALKS_INDEXER")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.moresleep.validate()?;
        self.elasticsearch.validate()?;
        if let Some(deadline) = self.sync.operation_timeout() {
            if self.server.request_timeout() <= deadline {
                return Err(ValidationError::RequestTimeoutBelowDeadline);
            }
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.environment == Environment::Production
    }
}

/// Rejects URLs that are not plain http(s).
fn require_http_url(url: &str, name: &'static str) -> Result<(), ValidationError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl(name))
    }
}
