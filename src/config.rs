//! Client configuration.
//!
//! Configuration can be assembled in code through
//! [`RiftClientBuilder`](crate::RiftClientBuilder) or loaded from TOML:
//!
//! ```toml
//! api_key = "RGAPI-..."
//! limit_per_10_seconds = 10
//! limit_per_10_minutes = 500
//! user_agent = "my-app/1.0"
//! cache_ttl_ms = 600000
//! ```
//!
//! File resolution order for [`ClientConfig::load`]:
//! 1. explicit path (if provided)
//! 2. `~/.riftgate/config.toml`
//!
//! When the file has no `api_key`, the `RIFTGATE_API_KEY` environment
//! variable is used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Result, RiftError};

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "RIFTGATE_API_KEY";

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Requests permitted per 10 seconds (default: 10).
    #[serde(default = "default_limit_per_10_seconds")]
    pub limit_per_10_seconds: u32,
    /// Requests permitted per rolling 10 minutes (default: 500).
    #[serde(default = "default_limit_per_10_minutes")]
    pub limit_per_10_minutes: usize,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default = "default_true")]
    pub rate_limit_enabled: bool,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    /// Cache time-to-live in milliseconds (default: 600000).
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
    /// Cache slots (default: `limit_per_10_minutes`).
    #[serde(default)]
    pub cache_capacity: Option<usize>,
    /// Longest a request may wait at the rate limiter gate.
    #[serde(default)]
    pub gate_timeout_ms: Option<u64>,
    /// HTTP timeout in seconds (default: 30).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Send every request to this scheme + host instead.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            limit_per_10_seconds: default_limit_per_10_seconds(),
            limit_per_10_minutes: default_limit_per_10_minutes(),
            user_agent: None,
            rate_limit_enabled: true,
            cache_enabled: true,
            cache_ttl_ms: default_cache_ttl_ms(),
            cache_capacity: None,
            gate_timeout_ms: None,
            request_timeout_secs: default_request_timeout_secs(),
            base_url: None,
        }
    }
}

fn default_limit_per_10_seconds() -> u32 {
    10
}

fn default_limit_per_10_minutes() -> usize {
    500
}

fn default_true() -> bool {
    true
}

fn default_cache_ttl_ms() -> u64 {
    600_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Load configuration from the standard locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_config_path(explicit_path)?;
        let content = fs::read_to_string(&path).map_err(|e| {
            RiftError::Configuration(format!("failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            RiftError::Configuration(msg) => {
                RiftError::Configuration(format!("{msg} (in {path:?})"))
            }
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)
            .map_err(|e| RiftError::Configuration(format!("failed to parse config: {e}")))?;
        if config.api_key.is_none() {
            config.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the limits are usable.
    pub fn validate(&self) -> Result<()> {
        if self.limit_per_10_seconds == 0 {
            return Err(RiftError::Configuration(
                "limit_per_10_seconds must be greater than zero".into(),
            ));
        }
        if self.limit_per_10_minutes == 0 {
            return Err(RiftError::Configuration(
                "limit_per_10_minutes must be greater than zero".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(RiftError::Configuration(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(path.to_path_buf());
            }
            return Err(RiftError::Configuration(format!(
                "config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".riftgate").join("config.toml");
            if user_config.exists() {
                return Ok(user_config);
            }
        }

        Err(RiftError::Configuration(
            "no config file found (tried ~/.riftgate/config.toml)".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config.limit_per_10_seconds, 10);
        assert_eq!(config.limit_per_10_minutes, 500);
        assert!(config.rate_limit_enabled);
        assert!(config.cache_enabled);
        assert_eq!(config.cache_ttl_ms, 600_000);
        assert_eq!(config.cache_capacity, None);
    }

    #[test]
    fn zero_limit_rejected() {
        let err = ClientConfig::from_toml_str("limit_per_10_seconds = 0").unwrap_err();
        assert!(err.to_string().contains("limit_per_10_seconds"));
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(ClientConfig::from_toml_str("limit_per_hour = 5").is_err());
    }
}
