//! Client-side rate limiting.
//!
//! The server publishes two limits: N requests per 10 seconds and M
//! requests per rolling 10 minutes. [`RateLimiter`] enforces the first as a
//! minimum spacing of `10s / N` between consecutive requests and keeps an
//! exact count for the second.
//!
//! Only the spacing constraint blocks. The rolling window is bookkeeping:
//! [`RateLimiter::remaining_calls`] and [`RateLimiter::time_until_slot_frees`]
//! report on it, but [`RateLimiter::acquire_and_record`] never waits for it.
//!
//! # Ordering
//!
//! All limited calls pass through one gate, a `tokio::sync::Mutex`, which
//! grants the lock in FIFO order. The spacing wait happens while the lock is
//! held, so requests leave the gate in arrival order and exactly one spacing
//! interval apart. Dropping the future while it waits (or exceeding the
//! timeout budget) leaves no trace in the bookkeeping.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::telemetry;
use crate::{Result, RiftError};

/// Length of the short interval the per-interval limit is expressed in.
pub const SHORT_INTERVAL: Duration = Duration::from_secs(10);

/// Length of the rolling window. Default: 10 minutes.
pub const DEFAULT_ROLLING_WINDOW: Duration = Duration::from_secs(600);

/// Rate limits for one API key.
///
/// ```rust
/// # use riftgate::limiter::RateLimitConfig;
/// # use std::time::Duration;
/// let config = RateLimitConfig::from_limits(10, 500).unwrap();
/// assert_eq!(config.min_spacing, Duration::from_millis(1000));
/// assert_eq!(config.rolling_window_limit, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Minimum time between two limited requests.
    pub min_spacing: Duration,
    /// Length of the rolling window.
    pub rolling_window: Duration,
    /// Requests permitted per rolling window.
    pub rolling_window_limit: usize,
}

impl RateLimitConfig {
    /// Derive from "N per 10 seconds" and "M per 10 minutes".
    ///
    /// Both limits must be non-zero.
    pub fn from_limits(per_10_seconds: u32, per_10_minutes: usize) -> Result<Self> {
        if per_10_seconds == 0 {
            return Err(RiftError::Configuration(
                "limit per 10 seconds must be greater than zero".into(),
            ));
        }
        if per_10_minutes == 0 {
            return Err(RiftError::Configuration(
                "limit per 10 minutes must be greater than zero".into(),
            ));
        }
        Ok(Self {
            min_spacing: SHORT_INTERVAL / per_10_seconds,
            rolling_window: DEFAULT_ROLLING_WINDOW,
            rolling_window_limit: per_10_minutes,
        })
    }

    /// Override the rolling window length.
    pub fn rolling_window(mut self, window: Duration) -> Self {
        self.rolling_window = window;
        self
    }
}

#[derive(Debug, Default)]
struct GateState {
    last_call: Option<Instant>,
    window: VecDeque<Instant>,
}

impl GateState {
    /// Drop timestamps that have left the rolling window.
    fn trim(&mut self, window: Duration, now: Instant) {
        while let Some(&oldest) = self.window.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.window.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Spacing gate plus rolling window accounting.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    enabled: AtomicBool,
    state: Mutex<GateState>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            enabled: AtomicBool::new(true),
            state: Mutex::new(GateState::default()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Turn the spacing wait on or off.
    ///
    /// While disabled, calls through the gate still get recorded, so the
    /// window counts stay accurate and re-enabling picks up where the
    /// spacing left off.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        debug!(enabled, "rate limiter toggled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Wait for the spacing constraint, then record the call.
    ///
    /// With a `timeout` budget, gives up with [`RiftError::RateLimitTimeout`]
    /// once queueing plus spacing would exceed it. Nothing is recorded
    /// unless the wait completes.
    pub async fn acquire_and_record(&self, timeout: Option<Duration>) -> Result<()> {
        match timeout {
            Some(budget) => tokio::time::timeout(budget, self.acquire_inner())
                .await
                .map_err(|_| {
                    debug!(budget_ms = budget.as_millis() as u64, "rate limiter wait timed out");
                    RiftError::RateLimitTimeout { budget }
                }),
            None => {
                self.acquire_inner().await;
                Ok(())
            }
        }
    }

    async fn acquire_inner(&self) {
        let arrived = Instant::now();
        let mut state = self.state.lock().await;

        if self.is_enabled() {
            if let Some(last) = state.last_call {
                let since = Instant::now().saturating_duration_since(last);
                if since < self.config.min_spacing {
                    let delay = self.config.min_spacing - since;
                    trace!(delay_ms = delay.as_millis() as u64, "spacing requests");
                    tokio::time::sleep(delay).await;
                }
            }
        }

        let now = Instant::now();
        metrics::histogram!(telemetry::RATE_LIMIT_WAIT_SECONDS)
            .record(now.saturating_duration_since(arrived).as_secs_f64());
        state.last_call = Some(now);
        state.window.push_back(now);
        state.trim(self.config.rolling_window, now);
    }

    /// Requests recorded within the rolling window.
    pub async fn requests_in_window(&self) -> usize {
        let mut state = self.state.lock().await;
        state.trim(self.config.rolling_window, Instant::now());
        state.window.len()
    }

    /// Requests still permitted in the current rolling window.
    pub async fn remaining_calls(&self) -> usize {
        self.config
            .rolling_window_limit
            .saturating_sub(self.requests_in_window().await)
    }

    /// How long until the window count drops below the limit.
    ///
    /// `Duration::ZERO` when the window has spare capacity. The window is
    /// not enforced and may hold more than the limit; the wait then covers
    /// as many expiries as it takes to get back under it.
    pub async fn time_until_slot_frees(&self) -> Duration {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        state.trim(self.config.rolling_window, now);
        let len = state.window.len();
        let limit = self.config.rolling_window_limit;
        if len < limit {
            return Duration::ZERO;
        }
        match state.window.get(len - limit) {
            Some(&blocking) => {
                (blocking + self.config.rolling_window).saturating_duration_since(now)
            }
            None => Duration::ZERO,
        }
    }

    /// Oldest request still inside the rolling window.
    pub async fn oldest_request_timestamp(&self) -> Option<Instant> {
        let mut state = self.state.lock().await;
        state.trim(self.config.rolling_window, Instant::now());
        state.window.front().copied()
    }

    /// Oldest request in the window, if it is at least `max_age` old.
    pub async fn oldest_request_timestamp_older_than(&self, max_age: Duration) -> Option<Instant> {
        let now = Instant::now();
        self.oldest_request_timestamp()
            .await
            .filter(|&ts| now.saturating_duration_since(ts) >= max_age)
    }
}
