//! Configuration validation rules.
//!
//! This module provides validation logic for `UnionpediaConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::cache::CacheConfig;
use crate::config::UnionpediaConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl UnionpediaConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `base_url` is empty or not an http(s) URL
    /// - `user_agent` is empty
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - any cache store is configured with a zero TTL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid { field: "base_url".into(), reason: "must not be empty".into() });
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                field: "base_url".into(),
                reason: "must start with http:// or https://".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        let stores = [
            ("cache", Some(self.cache)),
            ("object_cache", self.object_cache),
            ("outgoing_cache", self.outgoing_cache),
            ("incoming_cache", self.incoming_cache),
            ("html_cache", self.html_cache),
        ];
        for (field, store) in stores {
            if let Some(CacheConfig { ttl_ms: 0, .. }) = store {
                return Err(ConfigError::Invalid {
                    field: field.into(),
                    reason: "ttl_ms must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }
}
