//! In-memory TTL cache for raw catalog responses.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use pokedex_core::constants::DEFAULT_CACHE_TTL_SECONDS;
use pokedex_core::error::{PokedexError, Result};

/// First sweep time for TTLs too long to add to the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Cache entry with its insertion time.
#[derive(Clone)]
struct CacheEntry {
    payload: Bytes,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.inserted_at) >= ttl
    }
}

/// Cache configuration.
///
/// The TTL is signed so that zero and negative values coming from flags or
/// config files reach validation instead of failing to parse.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime and sweep interval, in milliseconds
    pub ttl_millis: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_millis: DEFAULT_CACHE_TTL_SECONDS * 1000,
        }
    }
}

impl CacheConfig {
    /// Creates a config from a TTL in whole seconds.
    pub fn from_secs(seconds: i64) -> Self {
        Self {
            ttl_millis: seconds.saturating_mul(1000),
        }
    }

    /// Validates the config and returns the TTL.
    pub fn ttl(&self) -> Result<Duration> {
        if self.ttl_millis <= 0 {
            return Err(PokedexError::InvalidConfiguration(format!(
                "cache ttl must be greater than zero, got {}ms",
                self.ttl_millis
            )));
        }
        Ok(Duration::from_millis(self.ttl_millis as u64))
    }
}

/// State shared between the cache handle and its sweep task.
struct Shared {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    sweeps: AtomicU64,
    evicted: AtomicU64,
}

impl Shared {
    /// Removes every entry whose age has reached the TTL.
    fn sweep(&self) -> usize {
        let mut entries = self.entries.write();
        let now = Instant::now();
        let before = entries.len();

        entries.retain(|key, entry| {
            let expired = entry.is_expired_at(now, self.ttl);
            if expired {
                trace!(key = %key, "Evicting expired entry");
            }
            !expired
        });

        let evicted = before - entries.len();
        let remaining = entries.len();
        drop(entries);

        self.sweeps.fetch_add(1, Ordering::Relaxed);
        self.evicted.fetch_add(evicted as u64, Ordering::Relaxed);
        if evicted > 0 {
            debug!(evicted, remaining, "Cache sweep evicted entries");
        }
        evicted
    }
}

/// Thread-safe cache of opaque byte payloads with time-based eviction.
///
/// Construction spawns one sweep task on the current Tokio runtime. Every TTL
/// the task removes entries whose age has reached the TTL, so an entry lives
/// at least one TTL and at most two. Stopping the sweep leaves storage usable.
pub struct ExpiringCache {
    shared: Arc<Shared>,
    stop_tx: Mutex<Option<oneshot::Sender<()>>>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl ExpiringCache {
    /// Creates a cache whose entries live for `ttl` and starts its sweep.
    ///
    /// Fails with [`PokedexError::InvalidConfiguration`] for a zero TTL and
    /// with [`PokedexError::RuntimeUnavailable`] outside a Tokio runtime.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(PokedexError::InvalidConfiguration(
                "cache ttl must be greater than zero".into(),
            ));
        }

        let handle = Handle::try_current()
            .map_err(|e| PokedexError::RuntimeUnavailable(e.to_string()))?;

        let shared = Arc::new(Shared {
            entries: RwLock::new(HashMap::new()),
            ttl,
            sweeps: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
        });

        let (stop_tx, stop_rx) = oneshot::channel();
        let now = Instant::now();
        let first_tick = now.checked_add(ttl).unwrap_or(now + FAR_FUTURE);
        let sweeper = handle.spawn(sweep_loop(Arc::clone(&shared), first_tick, stop_rx));

        Ok(Self {
            shared,
            stop_tx: Mutex::new(Some(stop_tx)),
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    /// Creates a cache from configuration.
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.ttl()?)
    }

    /// Stores `payload` under `key`, replacing any previous entry and its age.
    pub fn insert(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        let entry = CacheEntry {
            payload: payload.into(),
            inserted_at: Instant::now(),
        };
        self.shared.entries.write().insert(key.into(), entry);
    }

    /// Returns the payload stored under `key`, or `None` on a miss.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.shared
            .entries
            .read()
            .get(key)
            .map(|entry| entry.payload.clone())
    }

    /// Runs one sweep immediately and returns how many entries it evicted.
    pub fn cleanup_expired(&self) -> usize {
        self.shared.sweep()
    }

    /// Signals the sweep task to exit and returns without waiting for it.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn stop(&self) {
        match self.stop_tx.lock().take() {
            Some(tx) => {
                // The receiver is gone only if the task already exited.
                let _ = tx.send(());
                debug!("Cache stop signal sent");
            }
            None => debug!("Cache sweep already stopped"),
        }
    }

    /// Signals the sweep task to exit and waits until it has.
    pub async fn shutdown(&self) {
        self.stop();

        let handle = self.sweeper.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "Cache sweep task did not exit cleanly");
            }
        }
    }

    /// Returns true until the cache has been stopped.
    pub fn is_running(&self) -> bool {
        self.stop_tx.lock().is_some()
    }

    /// Returns the configured TTL (also the sweep interval).
    pub fn ttl(&self) -> Duration {
        self.shared.ttl
    }

    /// Returns the number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.shared.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.shared.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.shared.entries.read();
        let now = Instant::now();
        let expired = entries
            .values()
            .filter(|e| e.is_expired_at(now, self.shared.ttl))
            .count();

        CacheStats {
            entries: entries.len(),
            expired_pending: expired,
            sweeps: self.shared.sweeps.load(Ordering::Relaxed),
            evicted: self.shared.evicted.load(Ordering::Relaxed),
        }
    }
}

impl fmt::Debug for ExpiringCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("ttl", &self.shared.ttl)
            .field("entries", &self.len())
            .field("running", &self.is_running())
            .finish()
    }
}

/// Wakes every TTL and sweeps, until stopped or the cache is dropped.
async fn sweep_loop(
    shared: Arc<Shared>,
    first_tick: Instant,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let ttl = shared.ttl;
    let mut ticker = time::interval_at(first_tick, ttl);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(?ttl, "Cache sweep started");

    loop {
        tokio::select! {
            biased;
            // A dropped sender also resolves this branch.
            _ = &mut stop_rx => {
                debug!("Cache sweep received stop signal, exiting");
                return;
            }
            _ = ticker.tick() => {
                shared.sweep();
            }
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Stored entries (including expired ones awaiting the next sweep)
    pub entries: usize,
    /// Entries already past their TTL but not yet swept
    pub expired_pending: usize,
    /// Completed sweeps
    pub sweeps: u64,
    /// Entries evicted by sweeps so far
    pub evicted: u64,
}
