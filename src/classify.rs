//! HTTP status classification.
//!
//! | Status | Outcome |
//! |---|---|
//! | 200 | success |
//! | 400, 401 | [`RiftError::Client`] |
//! | 404 | pass-through, endpoint code decides what "not found" means |
//! | 429 | [`RiftError::RateLimitExceeded`] |
//! | 500, 503 | [`RiftError::Server`] |
//! | anything else | pass-through |

use std::time::Duration;

use crate::RiftError;

/// Non-error outcome of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    /// Handed back to the caller unchanged.
    PassThrough(u16),
}

/// Classify `status`. `retry_after` is only used for 429.
pub fn classify(status: u16, retry_after: Option<Duration>) -> Result<StatusClass, RiftError> {
    match status {
        200 => Ok(StatusClass::Success),
        400 => Err(RiftError::Client {
            status,
            reason: "bad request",
        }),
        401 => Err(RiftError::Client {
            status,
            reason: "unauthorized",
        }),
        429 => Err(RiftError::RateLimitExceeded { retry_after }),
        500 => Err(RiftError::Server {
            status,
            reason: "internal",
        }),
        503 => Err(RiftError::Server {
            status,
            reason: "unavailable",
        }),
        other => Ok(StatusClass::PassThrough(other)),
    }
}
