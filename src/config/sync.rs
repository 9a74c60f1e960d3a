//! Reindex behavior configuration

use serde::Deserialize;
use std::time::Duration;

/// Sync configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Upper bound for one reindex operation in seconds (0 disables)
    #[serde(default = "default_operation_timeout")]
    pub operation_timeout_secs: u64,
}

impl SyncConfig {
    /// Get the operation deadline, if one is configured
    pub fn operation_timeout(&self) -> Option<Duration> {
        match self.operation_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            operation_timeout_secs: default_operation_timeout(),
        }
    }
}

fn default_operation_timeout() -> u64 {
    300
}
