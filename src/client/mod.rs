//! Client entry point and endpoint handles.
//!
//! A [`RiftClient`] owns one [`Dispatcher`] (and through it one rate
//! limiter and one response cache) for the lifetime of an API key.
//! Endpoint code obtains an [`Endpoint`] for its [`MethodSpec`] and builds
//! requests from it; every handle shares the client's limiter and cache.

mod builder;

pub use builder::RiftClientBuilder;

use std::sync::Arc;
use std::time::Duration;

use crate::Result;
use crate::cache::ResponseCache;
use crate::dispatch::Dispatcher;
use crate::limiter::RateLimiter;
use crate::types::{ArgList, Region, RequestDescriptor, RequestDescriptorBuilder, Response};
use crate::url::MethodSpec;

/// Handle to a configured request execution layer. Cheap to clone.
#[derive(Clone)]
pub struct RiftClient {
    dispatcher: Arc<Dispatcher>,
}

impl RiftClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> RiftClientBuilder {
        RiftClientBuilder::new()
    }

    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Handle for issuing requests against one method group.
    pub fn endpoint(&self, spec: MethodSpec) -> Endpoint {
        Endpoint {
            spec,
            dispatcher: self.dispatcher.clone(),
        }
    }

    /// Execute a prepared descriptor against `spec`.
    pub async fn execute(
        &self,
        spec: &MethodSpec,
        request: &RequestDescriptor,
    ) -> Result<Arc<Response>> {
        self.dispatcher.execute(spec, request).await
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        self.dispatcher.limiter()
    }

    /// `None` when caching is disabled.
    pub fn cache(&self) -> Option<&Arc<ResponseCache>> {
        self.dispatcher.cache()
    }

    /// Turn the spacing wait on or off for every endpoint of this client.
    pub fn set_rate_limit_enabled(&self, enabled: bool) {
        self.limiter().set_enabled(enabled);
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        if let Some(cache) = self.cache() {
            cache.clear();
        }
    }
}

/// Requests for one method group, sharing the client's limiter and cache.
#[derive(Clone)]
pub struct Endpoint {
    spec: MethodSpec,
    dispatcher: Arc<Dispatcher>,
}

impl Endpoint {
    pub fn spec(&self) -> &MethodSpec {
        &self.spec
    }

    /// Start a request for `operation` (e.g. `"by-summoner/{summonerId}/recent"`).
    ///
    /// Method groups that are not rate limited mark the request as bypassing
    /// the gate.
    pub fn request(&self, operation: impl Into<String>) -> EndpointRequest<'_> {
        EndpointRequest {
            endpoint: self,
            builder: RequestDescriptor::builder(operation)
                .bypass_rate_limit(!self.spec.rate_limited),
        }
    }

    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Arc<Response>> {
        self.dispatcher.execute(&self.spec, request).await
    }
}

/// A request being assembled against an [`Endpoint`].
pub struct EndpointRequest<'a> {
    endpoint: &'a Endpoint,
    builder: RequestDescriptorBuilder,
}

impl EndpointRequest<'_> {
    pub fn region(mut self, region: Region) -> Self {
        self.builder = self.builder.region(region);
        self
    }

    pub fn path_arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.path_arg(key, value);
        self
    }

    pub fn path_args(mut self, args: ArgList) -> Self {
        self.builder = self.builder.path_args(args);
        self
    }

    pub fn query_arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.query_arg(key, value);
        self
    }

    pub fn query_args(mut self, args: ArgList) -> Self {
        self.builder = self.builder.query_args(args);
        self
    }

    pub fn skip_cache(mut self, skip: bool) -> Self {
        self.builder = self.builder.skip_cache(skip);
        self
    }

    pub fn bypass_rate_limit(mut self, bypass: bool) -> Self {
        self.builder = self.builder.bypass_rate_limit(bypass);
        self
    }

    pub fn gate_timeout(mut self, budget: Duration) -> Self {
        self.builder = self.builder.gate_timeout(budget);
        self
    }

    /// The descriptor without sending it.
    pub fn build(self) -> RequestDescriptor {
        self.builder.build()
    }

    pub async fn send(self) -> Result<Arc<Response>> {
        let endpoint = self.endpoint;
        let request = self.builder.build();
        endpoint.execute(&request).await
    }
}
