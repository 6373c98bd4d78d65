//! Common traits for the Pokedex client.
//!
//! The REPL only talks to the remote catalog through [`Catalog`], so it can be
//! driven by an in-memory fake in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{LocationAreaPage, Pokemon};

// ═══════════════════════════════════════════════════════════════════════════════
// CATALOG TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for reading the paginated remote catalog.
///
/// Implementations are expected to serve repeated requests from a response
/// cache where possible.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// URL of the first page of location areas.
    fn first_page_url(&self) -> String;

    /// Fetches one page of location areas by its full URL.
    ///
    /// Page URLs come from [`Catalog::first_page_url`] or from the
    /// `next`/`previous` links of an earlier page.
    async fn location_areas(&self, url: &str) -> Result<LocationAreaPage>;

    /// Returns the names of the creatures that can be encountered in an area.
    async fn explore_area(&self, area: &str) -> Result<Vec<String>>;

    /// Fetches the details of a single creature.
    async fn pokemon(&self, name: &str) -> Result<Pokemon>;
}
