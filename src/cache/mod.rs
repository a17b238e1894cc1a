//! Caching subsystem.
//!
//! - [`lru::LruStore`]: generic capacity-bounded map with
//!   least-recently-used eviction.
//!
//! - [`response::ResponseCache`]: thread-safe store of API responses keyed
//!   by request URL, built on `LruStore`. TTL is enforced by the reader,
//!   see the [`response`] module docs.

pub mod lru;
pub mod response;

pub use lru::LruStore;
pub use response::{CacheConfig, DEFAULT_TTL, ResponseCache};
