//! Creature details returned by the catalog and kept in the Pokedex.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_CATCH_EXPERIENCE;
use crate::types::NamedResource;

/// Details of a single creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    /// Creature name (lowercase, as used in URLs)
    pub name: String,
    /// Experience gained for defeating it; the catalog sends null for some forms
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Height in decimetres
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms
    #[serde(default)]
    pub weight: u32,
    /// Base stats
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    /// Elemental types, in slot order
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

impl Pokemon {
    /// Base experience used as the catch difficulty, capped at
    /// [`MAX_CATCH_EXPERIENCE`]. Missing values count as zero.
    pub fn catch_difficulty(&self) -> u32 {
        self.base_experience.unwrap_or(0).min(MAX_CATCH_EXPERIENCE)
    }
}

/// One base stat of a creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    /// Base value of the stat
    pub base_stat: u32,
    /// Which stat this is (e.g. "hp", "attack")
    pub stat: NamedResource,
}

/// One elemental type slot of a creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    /// Slot index (1 = primary)
    #[serde(default)]
    pub slot: u32,
    /// The type itself (e.g. "water")
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIDGEY: &str = r#"{
        "id": 16,
        "name": "pidgey",
        "base_experience": 50,
        "height": 3,
        "weight": 18,
        "stats": [
            {"base_stat": 40, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 45, "effort": 0, "stat": {"name": "attack", "url": ""}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "normal", "url": ""}},
            {"slot": 2, "type": {"name": "flying", "url": ""}}
        ]
    }"#;

    #[test]
    fn test_decode_pokemon() {
        let p: Pokemon = serde_json::from_str(PIDGEY).unwrap();

        assert_eq!(p.name, "pidgey");
        assert_eq!(p.height, 3);
        assert_eq!(p.weight, 18);
        assert_eq!(p.stats[0].stat.name, "hp");
        assert_eq!(p.stats[1].base_stat, 45);
        assert_eq!(p.types[1].kind.name, "flying");
    }

    #[test]
    fn test_catch_difficulty_is_capped() {
        let mut p: Pokemon = serde_json::from_str(PIDGEY).unwrap();
        assert_eq!(p.catch_difficulty(), 50);

        p.base_experience = Some(608);
        assert_eq!(p.catch_difficulty(), MAX_CATCH_EXPERIENCE);
    }

    #[test]
    fn test_null_base_experience() {
        let p: Pokemon =
            serde_json::from_str(r#"{"name": "pikachu-cosplay", "base_experience": null}"#).unwrap();
        assert_eq!(p.base_experience, None);
        assert_eq!(p.catch_difficulty(), 0);
    }
}
