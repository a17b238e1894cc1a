//! Telemetry metric name constants.
//!
//! Centralised metric names for riftgate operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `riftgate_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `method`: API method group (e.g. "game", "summoner")
//! - `status`: outcome: "ok", "passthrough" or "error"

/// Total requests sent to the transport.
///
/// Labels: `method`, `status` ("ok" | "passthrough" | "error").
pub const REQUESTS_TOTAL: &str = "riftgate_requests_total";

/// Transport round-trip duration in seconds.
///
/// Labels: `method`.
pub const REQUEST_DURATION_SECONDS: &str = "riftgate_request_duration_seconds";

/// Total response cache hits. `get_fresh` reports stale entries as misses.
pub const CACHE_HITS_TOTAL: &str = "riftgate_cache_hits_total";

/// Total response cache misses, stale entries included.
pub const CACHE_MISSES_TOTAL: &str = "riftgate_cache_misses_total";

/// Cache hits discarded because the entry outlived its TTL.
pub const CACHE_STALE_TOTAL: &str = "riftgate_cache_stale_total";

/// Time spent suspended at the rate limiter gate, in seconds.
pub const RATE_LIMIT_WAIT_SECONDS: &str = "riftgate_rate_limit_wait_seconds";

/// Requests rejected by the server with 429.
pub const RATE_LIMIT_EXCEEDED_TOTAL: &str = "riftgate_rate_limit_exceeded_total";
