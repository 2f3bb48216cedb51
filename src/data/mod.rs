//! Core data models for the Pokedex CLI
//!
//! This module contains the PokeAPI records the commands work with: pages of
//! location areas, the encounters within an area, and Pokemon with their stats
//! and types. Only the fields the commands use are modelled; everything else in
//! a response is ignored during deserialization.

pub mod pokeapi;

pub use pokeapi::{ApiError, PokeApiClient};

use serde::{Deserialize, Serialize};

/// A name plus the API URL of the full resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the location-area listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas across all pages
    pub count: u32,
    /// URL of the next page, `None` on the last page
    pub next: Option<String>,
    /// URL of the previous page, `None` on the first page
    pub previous: Option<String>,
    /// Location areas on this page
    pub results: Vec<NamedResource>,
}

/// Details of a single location area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaDetails {
    pub id: u32,
    pub name: String,
    /// Pokemon that can be encountered in this area
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

/// A Pokemon as returned by `/pokemon/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Experience gained for defeating it; `null` for some special forms
    pub base_experience: Option<u32>,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonType>,
}

/// A base stat value such as `hp` or `attack`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// One of a Pokemon's elemental types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

impl Pokemon {
    /// Base experience, treating a missing value as zero
    pub fn catch_difficulty(&self) -> u32 {
        self.base_experience.unwrap_or(0)
    }
}
