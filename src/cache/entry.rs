//! A single cached response body and the instant it was stored.

use bytes::Bytes;
use tokio::time::{Duration, Instant};

/// Immutable cache record
///
/// `created_at` uses Tokio's monotonic clock so entry ages can be driven by a
/// paused runtime clock in tests.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry {
    /// Raw response body
    pub(crate) value: Bytes,
    /// When the entry was inserted
    pub(crate) created_at: Instant,
}

impl CacheEntry {
    pub(crate) fn new(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    /// Returns true once the entry is strictly older than `max_age` at `now`
    pub(crate) fn is_expired(&self, now: Instant, max_age: Duration) -> bool {
        now.saturating_duration_since(self.created_at) > max_age
    }
}
