//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - any timeout is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `origin` is empty
    /// - the two generation names collide
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        let timeouts = [
            ("shell_timeout_ms", self.shell_timeout_ms),
            ("sacred_timeout_ms", self.sacred_timeout_ms),
            ("asset_timeout_ms", self.asset_timeout_ms),
            ("api_timeout_ms", self.api_timeout_ms),
            ("default_timeout_ms", self.default_timeout_ms),
        ];
        for (field, ms) in timeouts {
            if ms < 100 {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must be at least 100ms".into() });
            }
            if ms > 300_000 {
                return Err(ConfigError::Invalid {
                    field: field.into(),
                    reason: "must not exceed 5 minutes (300000ms)".into(),
                });
            }
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.origin.is_empty() {
            return Err(ConfigError::Invalid { field: "origin".into(), reason: "must not be empty".into() });
        }

        if self.shell_generation == self.sacred_generation {
            return Err(ConfigError::Invalid {
                field: "sacred_generation".into(),
                reason: "must differ from shell_generation".into(),
            });
        }

        Ok(())
    }
}
