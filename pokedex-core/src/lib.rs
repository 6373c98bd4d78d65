//! # Pokedex Core
//!
//! Core types, errors, and traits shared by every Pokedex crate.
//!
//! - **Types**: Catalog response models (location areas, creatures)
//! - **Errors**: One error hierarchy with classification helpers
//! - **Constants**: Defaults for the remote catalog, cache, and catch rules
//! - **Traits**: The [`Catalog`] seam between the REPL and the fetch layer
//!
//! ## Example
//!
//! ```rust
//! use pokedex_core::LocationAreaPage;
//!
//! let page: LocationAreaPage = serde_json::from_str(
//!     r#"{"count":1,"next":null,"previous":null,"results":[{"name":"canalave-city-area","url":""}]}"#,
//! ).unwrap();
//! assert_eq!(page.area_names(), vec!["canalave-city-area"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PokedexError, Result};
pub use traits::*;
pub use types::*;
