//! HTTP transport seam.
//!
//! The dispatcher never talks to an HTTP library directly. It hands a
//! [`TransportRequest`] to a [`Transport`] and gets back the status, body
//! and rate-limit hint. [`HttpTransport`] is the reqwest implementation;
//! tests substitute their own.
//!
//! Transports report only I/O failures as errors
//! ([`RiftError::Transport`](crate::RiftError::Transport)). Every status
//! code, including 4xx and 5xx, comes back as a [`RawResponse`] for the
//! classifier to judge.

pub mod http;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

pub use http::HttpTransport;

/// A GET request as the transport sees it.
#[derive(Debug, Clone, Copy)]
pub struct TransportRequest<'a> {
    /// Full URL including the API key.
    pub url: &'a str,
    pub user_agent: Option<&'a str>,
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// Parsed `Retry-After` header, if the server sent one.
    pub retry_after: Option<Duration>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    pub fn retry_after(mut self, delay: Duration) -> Self {
        self.retry_after = Some(delay);
        self
    }
}

/// Performs HTTP GET requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name for logging/debugging.
    fn name(&self) -> &str;

    /// Send a GET request and return whatever the server answered.
    async fn get(&self, request: TransportRequest<'_>) -> Result<RawResponse>;
}
