//! Request execution.
//!
//! [`Dispatcher::execute`] runs one logical request through the pipeline:
//!
//! 1. region check against the method's supported set
//! 2. URL construction
//! 3. cache lookup (fresh hit returns immediately)
//! 4. rate limiter gate
//! 5. transport GET
//! 6. status classification, parsing, cache store
//!
//! Steps 1 and 2 fail before any I/O or limiter activity. The cache lock is
//! released before the gate is entered and the gate is released before the
//! cache is written, so no call ever holds both.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::classify::{StatusClass, classify};
use crate::limiter::RateLimiter;
use crate::telemetry;
use crate::transport::{Transport, TransportRequest};
use crate::types::{RequestDescriptor, Response};
use crate::url::{MethodSpec, UrlBuilder};
use crate::{Result, RiftError};

/// Orchestrates cache, rate limiter, transport and classifier.
///
/// Built once per client by [`RiftClientBuilder`](crate::RiftClientBuilder)
/// and shared by every endpoint handle.
pub struct Dispatcher {
    urls: UrlBuilder,
    limiter: Arc<RateLimiter>,
    transport: Arc<dyn Transport>,
    cache: Option<Arc<ResponseCache>>,
    cache_ttl: Duration,
    user_agent: Option<String>,
    gate_timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher without a cache.
    pub fn new(urls: UrlBuilder, limiter: Arc<RateLimiter>, transport: Arc<dyn Transport>) -> Self {
        Self {
            urls,
            limiter,
            transport,
            cache: None,
            cache_ttl: crate::cache::DEFAULT_TTL,
            user_agent: None,
            gate_timeout: None,
        }
    }

    /// Serve fresh responses from `cache`; entries at least `ttl` old are misses.
    pub fn with_cache(mut self, cache: Arc<ResponseCache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Default gate budget for requests that don't set their own.
    pub fn with_gate_timeout(mut self, budget: Duration) -> Self {
        self.gate_timeout = Some(budget);
        self
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn cache(&self) -> Option<&Arc<ResponseCache>> {
        self.cache.as_ref()
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Execute `request` against `method`.
    ///
    /// Returns the response for 200, 404 and any status the classifier
    /// passes through; endpoint code inspects [`Response::status`] for the
    /// latter. Fatal statuses come back as errors and are never cached.
    pub async fn execute(
        &self,
        method: &MethodSpec,
        request: &RequestDescriptor,
    ) -> Result<Arc<Response>> {
        if let Some(region) = request.region() {
            if !method.supports(region) {
                return Err(RiftError::RegionNotSupported {
                    region,
                    method: method.label().to_string(),
                });
            }
        }

        let url = self.urls.build(
            method,
            request.region(),
            request.operation(),
            request.path_args(),
            request.query_args(),
        )?;

        let cache = self.cache.as_ref().filter(|_| !request.skip_cache());
        if let Some(cache) = cache {
            if let Some(hit) = cache.get_fresh(url.key(), self.cache_ttl) {
                debug!(url = url.key(), "cache hit");
                return Ok(hit);
            }
        }

        if method.rate_limited && !request.bypass_rate_limit() {
            self.limiter
                .acquire_and_record(request.gate_timeout().or(self.gate_timeout))
                .await?;
        }

        let label = method.label();
        debug!(method = label, url = url.key(), transport = self.transport.name(), "sending request");
        let started = Instant::now();
        let sent = self
            .transport
            .get(TransportRequest {
                url: url.full(),
                user_agent: self.user_agent.as_deref(),
            })
            .await;
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "method" => label)
            .record(started.elapsed().as_secs_f64());

        let raw = sent.inspect_err(|e| {
            warn!(method = label, url = url.key(), error = %e, "transport failed");
            record_outcome(label, "error");
        })?;

        let class = classify(raw.status, raw.retry_after).inspect_err(|e| {
            warn!(method = label, url = url.key(), status = raw.status, error = %e, "request failed");
            if matches!(e, RiftError::RateLimitExceeded { .. }) {
                metrics::counter!(telemetry::RATE_LIMIT_EXCEEDED_TOTAL).increment(1);
            }
            record_outcome(label, "error");
        })?;

        match class {
            StatusClass::Success => {
                let value: Value = serde_json::from_str(&raw.body).map_err(|e| {
                    warn!(method = label, url = url.key(), error = %e, "unparseable response body");
                    record_outcome(label, "error");
                    RiftError::ResponsePayload(e)
                })?;
                record_outcome(label, "ok");
                let response = Arc::new(Response::new(value, raw.status));
                if let Some(cache) = cache {
                    cache.put(url.key(), response.clone());
                }
                Ok(response)
            }
            StatusClass::PassThrough(status) => {
                debug!(method = label, url = url.key(), status, "passing status through");
                record_outcome(label, "passthrough");
                let value = serde_json::from_str(&raw.body).unwrap_or(Value::Null);
                Ok(Arc::new(Response::new(value, status)))
            }
        }
    }
}

fn record_outcome(method: &'static str, status: &'static str) {
    metrics::counter!(telemetry::REQUESTS_TOTAL, "method" => method, "status" => status)
        .increment(1);
}
