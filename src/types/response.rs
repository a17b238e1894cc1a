//! Response type shared between the dispatcher, the cache and callers

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::time::Instant;

use crate::{Result, RiftError};

/// A response obtained from the API.
///
/// Handed out as `Arc<Response>`; the cache and any number of callers may
/// hold it at once, none can mutate it.
#[derive(Debug, Clone)]
pub struct Response {
    value: Value,
    status: u16,
    created_at: Instant,
}

impl Response {
    pub fn new(value: Value, status: u16) -> Self {
        Self::at(value, status, Instant::now())
    }

    /// Construct with an explicit creation time.
    pub fn at(value: Value, status: u16, created_at: Instant) -> Self {
        Self {
            value,
            status,
            created_at,
        }
    }

    /// Parsed body; `Value::Null` when the server sent nothing usable.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// `true` once `now - created_at >= ttl`.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }

    /// Turn a pass-through 404 into [`RiftError::NotFound`].
    ///
    /// Endpoint code calls this with a description of what was looked up
    /// (`"summoner 123"`); any other status is returned unchanged.
    pub fn into_found(self: Arc<Self>, what: impl Into<String>) -> Result<Arc<Self>> {
        if self.status == 404 {
            return Err(RiftError::NotFound(what.into()));
        }
        Ok(self)
    }

    /// Deserialize the body into a typed value.
    ///
    /// A shape mismatch is [`RiftError::Conversion`]; the body itself was
    /// already valid JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.value.clone()).map_err(RiftError::Conversion)
    }

    /// Array stored under `field`, or an empty list when the API omitted it.
    ///
    /// The upstream drops empty collections from its payloads entirely, so
    /// a missing or null field means "no items" rather than an error.
    pub fn list_or_empty(&self, field: &str) -> Vec<Value> {
        match self.value.get(field) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        }
    }
}
