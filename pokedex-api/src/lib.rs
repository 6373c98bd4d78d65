//! PokeAPI client for the Pokedex.
//!
//! Every request is served from the response cache when possible; on a miss
//! the body is fetched over HTTP and cached under its full URL.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;

pub use client::{ClientConfig, PokeApiClient};
