//! Catch registry and catch rolls
//!
//! A throw draws a number uniformly from `0..CATCH_ROLL_CEILING` and succeeds
//! when the draw is at least the Pokemon's base experience, so weak Pokemon
//! are easy to catch and anything with 800+ base experience never is.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::BTreeMap;

use crate::data::Pokemon;

/// Exclusive upper bound of a catch roll
pub const CATCH_ROLL_CEILING: u32 = 800;

/// Rolls a Pokeball throw against `pokemon`
///
/// # Returns
/// * `true` if the Pokemon was caught
pub fn throw_pokeball<R: Rng + ?Sized>(rng: &mut R, pokemon: &Pokemon) -> bool {
    rng.gen_range(0..CATCH_ROLL_CEILING) >= pokemon.catch_difficulty()
}

/// A Pokemon the user has caught
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    /// When it was (most recently) caught
    pub caught_at: DateTime<Utc>,
}

/// The user's caught Pokemon, keyed and ordered by name
#[derive(Debug, Default)]
pub struct Pokedex {
    caught: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a catch, replacing any earlier catch of the same name
    pub fn record(&mut self, name: impl Into<String>, pokemon: Pokemon) {
        self.caught.insert(
            name.into(),
            CaughtPokemon {
                pokemon,
                caught_at: Utc::now(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.caught.get(name)
    }

    /// Names of all caught Pokemon in alphabetical order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.caught.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.caught.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caught.is_empty()
    }
}
