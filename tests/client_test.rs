//! End-to-end tests for [`RiftClient`] against a wiremock server.

use std::time::Duration;

use riftgate::cache::CacheConfig;
use riftgate::{Region, RiftClient, RiftError, methods};
use serde::Deserialize;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECENT_GAMES: &str = "/api/lol/euw/v1.3/game/by-summoner/123/recent";

fn client(server: &MockServer) -> RiftClient {
    RiftClient::builder()
        .api_key("RGAPI-test")
        .limits(1000, 500)
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

#[derive(Debug, Deserialize)]
struct RecentGames {
    #[serde(rename = "summonerId")]
    summoner_id: u64,
    games: Vec<serde_json::Value>,
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn recent_games_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RECENT_GAMES))
        .and(query_param("api_key", "RGAPI-test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"summonerId":123,"games":[{"gameId":1}]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .endpoint(methods::GAME)
        .request("by-summoner/{summonerId}/recent")
        .region(Region::Euw)
        .path_arg("summonerId", 123)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let games: RecentGames = response.json().unwrap();
    assert_eq!(games.summoner_id, 123);
    assert_eq!(games.games.len(), 1);
}

#[tokio::test]
async fn second_request_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RECENT_GAMES))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"games":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let games = client.endpoint(methods::GAME);
    for _ in 0..3 {
        games
            .request("by-summoner/{summonerId}/recent")
            .region(Region::Euw)
            .path_arg("summonerId", 123)
            .send()
            .await
            .unwrap();
    }
    assert_eq!(client.cache().unwrap().len(), 1);
    assert_eq!(client.limiter().requests_in_window().await, 1);
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(RECENT_GAMES))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"games":[]}"#))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let games = client.endpoint(methods::GAME);
    let request = || {
        games
            .request("by-summoner/{summonerId}/recent")
            .region(Region::Euw)
            .path_arg("summonerId", 123)
    };
    request().send().await.unwrap();
    client.clear_cache();
    request().send().await.unwrap();
}

#[tokio::test]
async fn not_found_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let response = client(&server)
        .endpoint(methods::SUMMONER)
        .request("by-name/{names}")
        .region(Region::Na)
        .path_arg("names", "nobody")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let err = response.into_found("summoner nobody").unwrap_err();
    assert!(matches!(err, RiftError::NotFound(_)));
}

#[tokio::test]
async fn rate_limited_response_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = client(&server)
        .endpoint(methods::GAME)
        .request("by-summoner/1/recent")
        .region(Region::Na)
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, RiftError::RateLimitExceeded { .. }));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
}

#[tokio::test]
async fn unauthorized_is_a_client_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .endpoint(methods::CHAMPION)
        .request("")
        .region(Region::Na)
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!err.is_transient());
    assert!(client.cache().unwrap().is_empty());
}

#[tokio::test]
async fn static_data_bypasses_limiter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/lol/static-data/na/v1.2/champion"))
        .and(query_param("champData", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client
        .endpoint(methods::STATIC_DATA)
        .request("champion")
        .region(Region::Na)
        .query_arg("champData", "all")
        .send()
        .await
        .unwrap();
    assert_eq!(client.limiter().requests_in_window().await, 0);
}

#[tokio::test]
async fn unsupported_region_fails_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .endpoint(methods::GAME)
        .request("by-summoner/1/recent")
        .region(Region::Pbe)
        .send()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RiftError::RegionNotSupported {
            region: Region::Pbe,
            ..
        }
    ));
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn missing_api_key_is_rejected() {
    let err = RiftClient::builder().build().err().unwrap();
    assert!(matches!(err, RiftError::Configuration(_)));

    let err = RiftClient::builder().api_key("").build().err().unwrap();
    assert!(matches!(err, RiftError::Configuration(_)));
}

#[test]
fn zero_limits_are_rejected() {
    let err = RiftClient::builder()
        .api_key("k")
        .limits(0, 500)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, RiftError::Configuration(_)));
}

#[test]
fn cache_capacity_defaults_to_window_limit() {
    let client = RiftClient::builder()
        .api_key("k")
        .limits(10, 250)
        .build()
        .unwrap();
    assert_eq!(client.cache().unwrap().capacity(), 250);
}

#[test]
fn explicit_cache_capacity() {
    let client = RiftClient::builder()
        .api_key("k")
        .cache(CacheConfig::new().capacity(32))
        .build()
        .unwrap();
    assert_eq!(client.cache().unwrap().capacity(), 32);
}

#[test]
fn disabled_cache_has_no_store() {
    let client = RiftClient::builder()
        .api_key("k")
        .cache(CacheConfig::disabled())
        .build()
        .unwrap();
    assert!(client.cache().is_none());
    client.clear_cache();
}

#[test]
fn rate_limit_toggle_is_shared() {
    let client = RiftClient::builder()
        .api_key("k")
        .rate_limit_enabled(false)
        .build()
        .unwrap();
    let copy = client.clone();
    assert!(!copy.limiter().is_enabled());

    client.set_rate_limit_enabled(true);
    assert!(copy.limiter().is_enabled());
}
