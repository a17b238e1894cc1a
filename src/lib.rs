//! Riftgate - rate-limited, caching request layer for game data APIs
//!
//! This crate turns logical operations ("recent games for summoner 123 on
//! EUW") into HTTP requests against a region-sharded JSON API, paces them to
//! the server's published rate limits, serves repeats from an LRU cache and
//! classifies status codes into a small error taxonomy.
//!
//! Endpoint-specific code sits on top: it describes its method group with a
//! [`MethodSpec`], sends requests through an [`Endpoint`] and converts the
//! returned [`Response`] into its own types.
//!
//! # Example
//!
//! ```rust,no_run
//! use riftgate::{RiftClient, Region, methods};
//!
//! #[tokio::main]
//! async fn main() -> riftgate::Result<()> {
//!     let client = RiftClient::builder()
//!         .api_key("RGAPI-your-key")
//!         .limits(10, 500)
//!         .build()?;
//!
//!     let games = client
//!         .endpoint(methods::GAME)
//!         .request("by-summoner/{summonerId}/recent")
//!         .region(Region::Euw)
//!         .path_arg("summonerId", 123)
//!         .send()
//!         .await?
//!         .into_found("summoner 123")?;
//!
//!     println!("{} games", games.list_or_empty("games").len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod limiter;
pub mod methods;
pub mod telemetry;
pub mod transport;
pub mod types;
pub mod url;

// Re-export main types at crate root
pub use cache::{CacheConfig, ResponseCache};
pub use client::{Endpoint, EndpointRequest, RiftClient, RiftClientBuilder};
pub use config::ClientConfig;
pub use dispatch::Dispatcher;
pub use error::{RiftError, Result};
pub use limiter::{RateLimitConfig, RateLimiter};
pub use transport::{HttpTransport, RawResponse, Transport, TransportRequest};
pub use types::{ArgList, Region, RequestDescriptor, Response};
pub use url::{MethodSpec, ResolvedUrl, UrlBuilder};
