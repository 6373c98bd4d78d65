//! Domain types for the Pokedex client.
//!
//! - [`LocationAreaPage`]: One page of the location-area listing
//! - [`LocationArea`]: A single area and its encounters
//! - [`Pokemon`]: Details of a creature, as stored in the Pokedex

mod location;
mod pokemon;

pub use location::*;
pub use pokemon::*;
