//! Client configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (UNIONPEDIA_*)
//! 2. TOML config file (if UNIONPEDIA_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::CacheConfig;

mod validation;

pub use validation::ConfigError;

/// Client configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (UNIONPEDIA_*)
/// 2. TOML config file (if UNIONPEDIA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnionpediaConfig {
    /// Root URL of the encyclopedia. Normalized to end with a separator
    /// when the client is constructed.
    ///
    /// Set via UNIONPEDIA_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via UNIONPEDIA_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via UNIONPEDIA_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of redirects to follow.
    ///
    /// Set via UNIONPEDIA_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Capacity and TTL applied to every store without its own override.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Override for the concept-object store.
    #[serde(default)]
    pub object_cache: Option<CacheConfig>,

    /// Override for the outgoing-relations store.
    #[serde(default)]
    pub outgoing_cache: Option<CacheConfig>,

    /// Override for the incoming-relations store.
    #[serde(default)]
    pub incoming_cache: Option<CacheConfig>,

    /// Override for the fetched-document store.
    #[serde(default)]
    pub html_cache: Option<CacheConfig>,
}

fn default_base_url() -> String {
    "https://en.unionpedia.org/".into()
}

fn default_user_agent() -> String {
    "unionpedia-client/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_redirects() -> usize {
    5
}

impl Default for UnionpediaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            cache: CacheConfig::default(),
            object_cache: None,
            outgoing_cache: None,
            incoming_cache: None,
            html_cache: None,
        }
    }
}

impl UnionpediaConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `UNIONPEDIA_`
    /// 2. TOML file from `UNIONPEDIA_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("UNIONPEDIA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("UNIONPEDIA_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
