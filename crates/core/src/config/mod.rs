//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LANTERN_*)
//! 2. TOML config file (if LANTERN_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LANTERN_*)
/// 2. TOML config file (if LANTERN_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite cache store.
    ///
    /// Set via LANTERN_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Origin the manifest paths resolve against during install.
    ///
    /// Set via LANTERN_ORIGIN environment variable.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via LANTERN_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum bytes to fetch per request.
    ///
    /// Set via LANTERN_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Shell generation name. Bump the version suffix to supersede.
    #[serde(default = "default_shell_generation")]
    pub shell_generation: String,

    /// Sacred-data generation name. Bump the version suffix to supersede.
    #[serde(default = "default_sacred_generation")]
    pub sacred_generation: String,

    /// Fetch deadline for the cache-first shell route, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub shell_timeout_ms: u64,

    /// Fetch deadline for sacred-data background refreshes, in milliseconds.
    #[serde(default = "default_sacred_timeout_ms")]
    pub sacred_timeout_ms: u64,

    /// Fetch deadline for best-effort asset fetches, in milliseconds.
    #[serde(default = "default_asset_timeout_ms")]
    pub asset_timeout_ms: u64,

    /// Fetch deadline for network-first API calls, in milliseconds.
    #[serde(default = "default_api_timeout_ms")]
    pub api_timeout_ms: u64,

    /// Fetch deadline for unclassified requests, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Optional TOML file holding the cache manifests. When unset, the
    /// built-in manifest defaults apply.
    #[serde(default)]
    pub manifest_file: Option<PathBuf>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./lantern-cache.sqlite")
}

fn default_origin() -> String {
    "http://localhost:8000".into()
}

fn default_user_agent() -> String {
    "lantern/0.1".into()
}

fn default_max_bytes() -> usize {
    10_485_760 // 10MB; sacred documents run to several hundred KB
}

fn default_shell_generation() -> String {
    "shell-v1".into()
}

fn default_sacred_generation() -> String {
    "sacred-v1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_sacred_timeout_ms() -> u64 {
    60_000 // background refresh of large documents, latency-insensitive
}

fn default_asset_timeout_ms() -> u64 {
    10_000
}

fn default_api_timeout_ms() -> u64 {
    15_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            origin: default_origin(),
            user_agent: default_user_agent(),
            max_bytes: default_max_bytes(),
            shell_generation: default_shell_generation(),
            sacred_generation: default_sacred_generation(),
            shell_timeout_ms: default_timeout_ms(),
            sacred_timeout_ms: default_sacred_timeout_ms(),
            asset_timeout_ms: default_asset_timeout_ms(),
            api_timeout_ms: default_api_timeout_ms(),
            default_timeout_ms: default_timeout_ms(),
            manifest_file: None,
        }
    }
}

impl AppConfig {
    /// Named per-strategy timeouts as Durations.
    pub fn shell_timeout(&self) -> Duration {
        Duration::from_millis(self.shell_timeout_ms)
    }

    pub fn sacred_timeout(&self) -> Duration {
        Duration::from_millis(self.sacred_timeout_ms)
    }

    pub fn asset_timeout(&self) -> Duration {
        Duration::from_millis(self.asset_timeout_ms)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LANTERN_`
    /// 2. TOML file from `LANTERN_CONFIG_FILE` (if set)
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

        if let Ok(config_path) = std::env::var("LANTERN_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("LANTERN_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the cache manifests: from `manifest_file` if set, defaults otherwise.
    pub fn load_manifests(&self) -> Result<crate::CacheManifests, ConfigError> {
        match &self.manifest_file {
            None => Ok(crate::CacheManifests::default()),
            Some(path) => Figment::from(Toml::file(path))
                .extract()
                .map_err(|e| ConfigError::LoadFailed(e.to_string())),
        }
    }
}
