//! Location-area types for the remote catalog.
//!
//! Listing pages carry `next`/`previous` links that the REPL uses as
//! pagination cursors.

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another catalog resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name (e.g. "canalave-city-area")
    pub name: String,
    /// Full URL of the resource
    #[serde(default)]
    pub url: String,
}

/// One page of the location-area listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of areas in the catalog
    #[serde(default)]
    pub count: u64,
    /// URL of the next page, absent on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    #[serde(default)]
    pub previous: Option<String>,
    /// Areas on this page
    pub results: Vec<NamedResource>,
}

impl LocationAreaPage {
    /// Returns the area names on this page, in listing order.
    pub fn area_names(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.name.as_str()).collect()
    }
}

/// A single location area with the creatures encountered there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArea {
    /// Area name
    pub name: String,
    /// Encounters available in this area
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Returns the names of every creature encountered in this area.
    pub fn pokemon_names(&self) -> Vec<String> {
        self.pokemon_encounters
            .iter()
            .map(|e| e.pokemon.name.clone())
            .collect()
    }
}

/// One encounter entry of a location area.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    /// The creature that can be encountered
    pub pokemon: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_first_has_no_previous() {
        let json = r#"{
            "count": 1089,
            "next": "https://pokeapi.co/api/v2/location-area/?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"},
                {"name": "eterna-city-area", "url": "https://pokeapi.co/api/v2/location-area/2/"}
            ]
        }"#;
        let page: LocationAreaPage = serde_json::from_str(json).unwrap();

        assert_eq!(page.count, 1089);
        assert!(page.previous.is_none());
        assert!(page.next.as_deref().unwrap().contains("offset=20"));
        assert_eq!(page.area_names(), vec!["canalave-city-area", "eterna-city-area"]);
    }

    #[test]
    fn test_area_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "canalave-city-area",
            "encounter_method_rates": [],
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": ""}, "version_details": []},
                {"pokemon": {"name": "staryu", "url": ""}, "version_details": []}
            ]
        }"#;
        let area: LocationArea = serde_json::from_str(json).unwrap();

        assert_eq!(area.pokemon_names(), vec!["tentacool", "staryu"]);
    }

    #[test]
    fn test_area_without_encounters() {
        let area: LocationArea = serde_json::from_str(r#"{"name": "empty-cave"}"#).unwrap();
        assert!(area.pokemon_names().is_empty());
    }
}
