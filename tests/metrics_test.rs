//! Tests for metrics emitted by the dispatcher.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use riftgate::cache::ResponseCache;
use riftgate::telemetry;
use riftgate::transport::{RawResponse, Transport, TransportRequest};
use riftgate::url::UrlBuilder;
use riftgate::{
    Dispatcher, RateLimitConfig, RateLimiter, Region, RequestDescriptor, Response, Result, methods,
};

// ============================================================================
// Mock transport
// ============================================================================

struct FixedTransport {
    status: u16,
    body: &'static str,
}

#[async_trait]
impl Transport for FixedTransport {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn get(&self, _request: TransportRequest<'_>) -> Result<RawResponse> {
        Ok(RawResponse::new(self.status, self.body))
    }
}

fn dispatcher(status: u16, body: &'static str) -> Dispatcher {
    dispatcher_with_ttl(status, body, riftgate::cache::DEFAULT_TTL)
}

fn dispatcher_with_ttl(status: u16, body: &'static str, ttl: Duration) -> Dispatcher {
    let limiter = Arc::new(RateLimiter::new(
        RateLimitConfig::from_limits(1000, 500).unwrap(),
    ));
    Dispatcher::new(
        UrlBuilder::new("KEY"),
        limiter,
        Arc::new(FixedTransport { status, body }),
    )
    .with_cache(Arc::new(ResponseCache::new(16)), ttl)
}

fn recent_games() -> RequestDescriptor {
    RequestDescriptor::builder("by-summoner/{summonerId}/recent")
        .region(Region::Na)
        .path_arg("summonerId", 1)
        .build()
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Sum counter values for `name` carrying the label `status=<status>`.
fn counter_with_status(snapshot: &SnapshotVec, name: &str, status: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == "status" && l.value() == status)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

/// Run `dispatcher.execute` `times` times under a local recorder.
fn record(dispatcher: &Dispatcher, times: usize) -> (SnapshotVec, Vec<Result<Arc<Response>>>) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    let results = metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let request = recent_games();
                let mut results = Vec::new();
                for _ in 0..times {
                    results.push(dispatcher.execute(&methods::GAME, &request).await);
                }
                results
            })
        })
    });

    (snapshotter.snapshot().into_vec(), results)
}

// ============================================================================
// Tests
// ============================================================================

/// Runs async code within a local recorder scope on the multi-thread runtime.
///
/// `block_in_place` ensures the sync `with_local_recorder` closure stays
/// on the current thread while `block_on` drives the inner async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_request_records_metrics() {
    let dispatcher = dispatcher(200, r#"{"games":[]}"#);
    let (snapshot, results) = record(&dispatcher, 1);
    assert!(results[0].is_ok());

    assert_eq!(counter_with_status(&snapshot, telemetry::REQUESTS_TOTAL, "ok"), 1);
    assert!(
        has_histogram(&snapshot, telemetry::REQUEST_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
    assert!(
        has_histogram(&snapshot, telemetry::RATE_LIMIT_WAIT_SECONDS),
        "expected a gate wait histogram entry"
    );
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn cache_hit_skips_transport_metrics() {
    let dispatcher = dispatcher(200, r#"{"games":[]}"#);
    let (snapshot, results) = record(&dispatcher, 2);
    assert!(results.iter().all(|r| r.is_ok()));

    assert_eq!(counter_total(&snapshot, telemetry::REQUESTS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn stale_entry_counts_as_miss() {
    // zero ttl: every cached entry is stale as soon as it is stored
    let dispatcher = dispatcher_with_ttl(200, r#"{"games":[]}"#, Duration::ZERO);
    let (snapshot, results) = record(&dispatcher, 2);
    assert!(results.iter().all(|r| r.is_ok()));

    assert_eq!(counter_total(&snapshot, telemetry::REQUESTS_TOTAL), 2);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 0);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 2);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_STALE_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn rate_limited_response_records_error_metrics() {
    let dispatcher = dispatcher(429, "");
    let (snapshot, results) = record(&dispatcher, 1);
    assert!(results[0].is_err());

    assert_eq!(counter_with_status(&snapshot, telemetry::REQUESTS_TOTAL, "error"), 1);
    assert_eq!(counter_total(&snapshot, telemetry::RATE_LIMIT_EXCEEDED_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn not_found_records_passthrough() {
    let dispatcher = dispatcher(404, "");
    let (snapshot, results) = record(&dispatcher, 1);
    assert_eq!(results[0].as_ref().unwrap().status(), 404);

    assert_eq!(
        counter_with_status(&snapshot, telemetry::REQUESTS_TOTAL, "passthrough"),
        1
    );
    assert_eq!(counter_total(&snapshot, telemetry::RATE_LIMIT_EXCEEDED_TOTAL), 0);
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let dispatcher = dispatcher(200, "{}");
    dispatcher
        .execute(&methods::GAME, &recent_games())
        .await
        .unwrap();
}
