//! Response cache for the Pokedex client.
//!
//! Stores opaque byte payloads under string keys. A background task sweeps
//! out entries once they reach the configured TTL.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::{CacheConfig, CacheStats, ExpiringCache};
