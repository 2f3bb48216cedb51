//! In-memory response cache with a background sweeper
//!
//! The `Cache` keeps raw response bodies keyed by request URL. A single mutex
//! guards the map; a Tokio task wakes every `interval` and drops entries older
//! than `interval`, so an entry lives for at least one interval and for just
//! under two intervals at most, depending on where it lands in the sweep cycle.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::entry::CacheEntry;

type Entries = HashMap<String, CacheEntry>;

/// Errors that can occur when constructing a cache
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// A zero interval would make the sweeper spin and expire everything
    #[error("Cache interval must be greater than zero")]
    InvalidInterval,

    /// The sweeper is a Tokio task and needs a runtime to be spawned on
    #[error("Cache must be created from within a Tokio runtime")]
    NoRuntime,
}

/// Time-bounded, thread-safe store of response bodies
///
/// `add` and `get` are plain in-memory operations and never touch the network.
/// `get` does not check entry age: staleness is handled by the sweeper alone.
/// Dropping the cache closes the shutdown channel, which also stops the
/// sweeper; `shutdown` additionally waits for the task to finish.
#[derive(Debug)]
pub struct Cache {
    entries: Arc<Mutex<Entries>>,
    interval: Duration,
    shutdown_tx: mpsc::Sender<()>,
    sweeper: JoinHandle<()>,
}

impl Cache {
    /// Creates an empty cache and spawns its sweeper on the current runtime
    ///
    /// # Arguments
    /// * `interval` - Both the sweep period and the maximum age of an entry
    ///
    /// # Returns
    /// * `Ok(Cache)` with the sweeper running
    /// * `Err(CacheError::InvalidInterval)` if `interval` is zero
    /// * `Err(CacheError::NoRuntime)` if called outside a Tokio runtime
    pub fn new(interval: Duration) -> Result<Self, CacheError> {
        if interval.is_zero() {
            return Err(CacheError::InvalidInterval);
        }
        let runtime = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;

        let entries = Arc::new(Mutex::new(Entries::new()));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let sweeper = runtime.spawn(sweep_loop(Arc::clone(&entries), interval, shutdown_rx));

        info!(interval_ms = interval.as_millis() as u64, "Response cache started");

        Ok(Self {
            entries,
            interval,
            shutdown_tx,
            sweeper,
        })
    }

    /// Inserts or replaces the entry for `key`, stamping it with the current time
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.lock();
        // Stamp under the lock so a replacement never carries an older timestamp.
        let entry = CacheEntry::new(value, Instant::now());
        entries.insert(key, entry);
    }

    /// Returns the stored body for `key`, or `None` if absent or already swept
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.lock().get(key).map(|entry| entry.value.clone())
    }

    /// Number of entries currently held, including expired ones not yet swept
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The sweep period, which is also the expiry threshold
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stops the sweeper and waits for it to exit
    pub async fn shutdown(self) {
        let Cache {
            shutdown_tx,
            sweeper,
            ..
        } = self;

        // A full channel means a signal is already pending.
        let _ = shutdown_tx.try_send(());
        if let Err(e) = sweeper.await {
            warn!(error = %e, "Cache sweeper ended abnormally");
        }
        info!("Response cache stopped");
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        lock_entries(&self.entries)
    }
}

/// Entries are plain data and every critical section leaves the map
/// consistent, so a poisoned lock is still safe to use.
fn lock_entries(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn sweep_loop(
    entries: Arc<Mutex<Entries>>,
    interval: Duration,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Skip the first tick (immediate)
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = reap(&mut lock_entries(&entries), Instant::now(), interval);
                if removed > 0 {
                    debug!(removed, "Swept expired cache entries");
                }
            }
            // Fires on an explicit signal and when the cache handle is dropped.
            _ = shutdown_rx.recv() => {
                break;
            }
        }
    }

    debug!("Cache sweeper exiting");
}

/// Removes every entry older than `max_age` at `now`, returning how many went
fn reap(entries: &mut Entries, now: Instant, max_age: Duration) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired(now, max_age));
    before - entries.len()
}
