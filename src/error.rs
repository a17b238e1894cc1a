//! Riftgate error types

use std::time::Duration;

use crate::types::Region;

/// Boxed cause carried by [`RiftError::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Riftgate error types
#[derive(Debug, thiserror::Error)]
pub enum RiftError {
    // Caller input errors, raised before any I/O
    #[error("region {region} is not supported by {method}")]
    RegionNotSupported { region: Region, method: String },

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("argument list must pair keys with values, got {0} items")]
    ArgumentCount(usize),

    // Network errors
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Successful status but the body is not valid JSON.
    #[error("malformed response payload: {0}")]
    ResponsePayload(#[from] serde_json::Error),

    /// A valid JSON body did not match the type the caller asked for.
    #[error("failed to convert response payload: {0}")]
    Conversion(#[source] serde_json::Error),

    // Classified status codes
    #[error("client error ({status}): {reason}")]
    Client { status: u16, reason: &'static str },

    #[error("rate limit exceeded, retry after {retry_after:?}")]
    RateLimitExceeded { retry_after: Option<Duration> },

    #[error("server error ({status}): {reason}")]
    Server { status: u16, reason: &'static str },

    /// The spacing wait at the rate limiter gate outlasted the caller's budget.
    #[error("timed out after {budget:?} waiting for the rate limiter")]
    RateLimitTimeout { budget: Duration },

    /// Raised by endpoint code when a pass-through 404 means "no such thing".
    #[error("not found: {0}")]
    NotFound(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RiftError {
    /// Whether the failure is transient at the system level.
    ///
    /// Riftgate never retries by itself; this is a hint for callers that do.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RiftError::Transport(_)
                | RiftError::RateLimitExceeded { .. }
                | RiftError::Server { .. }
                | RiftError::RateLimitTimeout { .. }
        )
    }

    /// Server-provided back-off hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RiftError::RateLimitExceeded { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status the error was classified from, if it came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            RiftError::Client { status, .. } | RiftError::Server { status, .. } => Some(*status),
            RiftError::RateLimitExceeded { .. } => Some(429),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RiftError {
    fn from(err: reqwest::Error) -> Self {
        RiftError::Transport(Box::new(err))
    }
}

/// Result type alias for Riftgate operations
pub type Result<T> = std::result::Result<T, RiftError>;
