//! Pokedex CLI Library
//!
//! This module exposes the cache, PokeAPI client, command handling and REPL
//! for use by the binary and by integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod data;
pub mod logging;
pub mod pokedex;
pub mod repl;
