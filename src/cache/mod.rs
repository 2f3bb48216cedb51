//! Cache module for deduplicating PokeAPI requests
//!
//! This module provides an in-memory, time-bounded cache of raw response bodies
//! keyed by request URL. Entries are reclaimed by a background sweeper task
//! rather than on read, so a lookup never pays for expiry checks.

mod entry;
mod store;

pub use store::{Cache, CacheError};
