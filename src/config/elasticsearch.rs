//! Elasticsearch configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::require_http_url;

/// Elasticsearch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ElasticsearchConfig {
    /// Base URL of the cluster
    #[serde(default = "default_url")]
    pub url: String,

    /// Basic auth user (empty disables auth)
    #[serde(default)]
    pub username: String,

    /// Basic auth password
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,

    /// Index holding every talk with private data merged in
    #[serde(default = "default_private_index")]
    pub private_index: String,

    /// Index holding approved, redacted talks
    #[serde(default = "default_public_index")]
    pub public_index: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ElasticsearchConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Elasticsearch configuration
    ///
    /// The two index names must differ: a shared index would expose private
    /// documents to public readers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_http_url(&self.url, "elasticsearch")?;
        if self.private_index.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ELASTICSEARCH__PRIVATE_INDEX"));
        }
        if self.public_index.trim().is_empty() {
            return Err(ValidationError::MissingRequired("ELASTICSEARCH__PUBLIC_INDEX"));
        }
        if self.private_index == self.public_index {
            return Err(ValidationError::IndexNamesCollide);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: String::new(),
            password: empty_secret(),
            private_index: default_private_index(),
            public_index: default_public_index(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:9200".to_string()
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_private_index() -> String {
    "javazone_private".to_string()
}

fn default_public_index() -> String {
    "javazone_public".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elasticsearch_config_defaults() {
        let config = ElasticsearchConfig::default();
        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.private_index, "javazone_private");
        assert_eq!(config.public_index, "javazone_public");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_shared_index() {
        let config = ElasticsearchConfig {
            public_index: "talks".to_string(),
            private_index: "talks".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::IndexNamesCollide));
    }

    #[test]
    fn test_validation_rejects_empty_index() {
        let config = ElasticsearchConfig {
            public_index: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::MissingRequired(_))));
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let config = ElasticsearchConfig {
            url: "localhost:9200".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUrl("elasticsearch")));
    }
}
