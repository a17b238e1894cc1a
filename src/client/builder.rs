//! Builder for configuring client instances

use std::sync::Arc;
use std::time::Duration;

use super::RiftClient;
use crate::cache::{CacheConfig, ResponseCache};
use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::limiter::{RateLimitConfig, RateLimiter};
use crate::transport::{HttpTransport, Transport};
use crate::url::UrlBuilder;
use crate::{Result, RiftError};

/// Builder for configuring client instances.
pub struct RiftClientBuilder {
    api_key: Option<String>,
    limit_per_10_seconds: u32,
    limit_per_10_minutes: usize,
    rolling_window: Option<Duration>,
    rate_limit_enabled: bool,
    cache: CacheConfig,
    user_agent: Option<String>,
    gate_timeout: Option<Duration>,
    request_timeout: Duration,
    base_url: Option<String>,
    regional_host: Option<String>,
    global_host: Option<String>,
    transport: Option<Arc<dyn Transport>>,
}

impl RiftClientBuilder {
    pub fn new() -> Self {
        let defaults = ClientConfig::default();
        Self {
            api_key: None,
            limit_per_10_seconds: defaults.limit_per_10_seconds,
            limit_per_10_minutes: defaults.limit_per_10_minutes,
            rolling_window: None,
            rate_limit_enabled: true,
            cache: CacheConfig::default(),
            user_agent: None,
            gate_timeout: None,
            request_timeout: Duration::from_secs(defaults.request_timeout_secs),
            base_url: None,
            regional_host: None,
            global_host: None,
            transport: None,
        }
    }

    /// Start from a loaded [`ClientConfig`].
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut cache = CacheConfig::new()
            .enabled(config.cache_enabled)
            .ttl(Duration::from_millis(config.cache_ttl_ms));
        cache.capacity = config.cache_capacity;

        Self {
            api_key: config.api_key.clone(),
            limit_per_10_seconds: config.limit_per_10_seconds,
            limit_per_10_minutes: config.limit_per_10_minutes,
            rate_limit_enabled: config.rate_limit_enabled,
            cache,
            user_agent: config.user_agent.clone(),
            gate_timeout: config.gate_timeout_ms.map(Duration::from_millis),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            base_url: config.base_url.clone(),
            ..Self::new()
        }
    }

    /// API key appended to every secure request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Requests permitted per 10 seconds and per rolling 10 minutes.
    pub fn limits(mut self, per_10_seconds: u32, per_10_minutes: usize) -> Self {
        self.limit_per_10_seconds = per_10_seconds;
        self.limit_per_10_minutes = per_10_minutes;
        self
    }

    /// Override the rolling window length (default: 10 minutes).
    pub fn rolling_window(mut self, window: Duration) -> Self {
        self.rolling_window = Some(window);
        self
    }

    /// Start with the spacing wait on or off (default: on).
    pub fn rate_limit_enabled(mut self, enabled: bool) -> Self {
        self.rate_limit_enabled = enabled;
        self
    }

    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Default budget for waiting at the rate limiter gate.
    pub fn gate_timeout(mut self, budget: Duration) -> Self {
        self.gate_timeout = Some(budget);
        self
    }

    /// HTTP timeout for the built-in transport.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Send every request to `base` (e.g. a mock server).
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = Some(base.into());
        self
    }

    /// Regional host template, `{region}` is substituted.
    pub fn regional_host(mut self, template: impl Into<String>) -> Self {
        self.regional_host = Some(template.into());
        self
    }

    pub fn global_host(mut self, host: impl Into<String>) -> Self {
        self.global_host = Some(host.into());
        self
    }

    /// Use a custom transport instead of reqwest.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RiftClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| RiftError::Configuration("no API key configured".into()))?;

        let mut limits =
            RateLimitConfig::from_limits(self.limit_per_10_seconds, self.limit_per_10_minutes)?;
        if let Some(window) = self.rolling_window {
            limits = limits.rolling_window(window);
        }
        let cache_capacity = self.cache.capacity.unwrap_or(limits.rolling_window_limit);

        let limiter = Arc::new(RateLimiter::new(limits));
        limiter.set_enabled(self.rate_limit_enabled);

        let mut urls = UrlBuilder::new(api_key);
        if let Some(template) = self.regional_host {
            urls = urls.regional_host(template);
        }
        if let Some(host) = self.global_host {
            urls = urls.global_host(host);
        }
        if let Some(base) = self.base_url {
            urls = urls.base_override(base);
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_timeout(self.request_timeout)?),
        };

        let mut dispatcher = Dispatcher::new(urls, limiter, transport);
        if self.cache.enabled {
            let cache = Arc::new(ResponseCache::new(cache_capacity));
            dispatcher = dispatcher.with_cache(cache, self.cache.ttl);
        }
        if let Some(agent) = self.user_agent {
            dispatcher = dispatcher.with_user_agent(agent);
        }
        if let Some(budget) = self.gate_timeout {
            dispatcher = dispatcher.with_gate_timeout(budget);
        }

        Ok(RiftClient::new(Arc::new(dispatcher)))
    }
}

impl Default for RiftClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
