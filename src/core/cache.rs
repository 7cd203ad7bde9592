//! In-memory time-to-live cache for fetched quote series.
//!
//! Entries are keyed by `(symbol, interval)` and stay valid for a fixed window
//! after insertion. There is no eviction beyond that: a stale entry is treated as
//! absent and is overwritten by the next successful fetch for the same key.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::core::models::{Interval, QuoteSeries};

/// Defines the behavior of the in-memory cache for an API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Read from the cache if a fresh entry is present; otherwise, fetch from the network
    /// and write the result to the cache. (Default)
    #[default]
    Use,
    /// Always fetch from the network, bypassing any cached entry, and write the new result to the cache.
    Refresh,
    /// Always fetch from the network and do not read from or write to the cache.
    Bypass,
}

/// Source of the current instant. Injected so freshness can be tested without sleeping.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward. Clones share the same time.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *guard += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Cache key. The symbol is stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub symbol: String,
    pub interval: Interval,
}

impl CacheKey {
    pub fn new(symbol: &str, interval: Interval) -> Self {
        Self {
            symbol: symbol.trim().to_ascii_uppercase(),
            interval,
        }
    }
}

/// A cached series and the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub series: QuoteSeries,
    pub inserted_at: Instant,
}

/// Whether `entry` may still be served at `now`.
///
/// The window is half-open: an entry exactly `ttl` old is stale.
pub fn is_fresh(entry: &CacheEntry, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(entry.inserted_at) < ttl
}

/// Process-wide quote cache shared by every clone of a client.
#[derive(Debug)]
pub struct QuoteCache {
    map: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl QuoteCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a copy of the entry's series if it is still fresh.
    pub async fn get(&self, key: &CacheKey) -> Option<QuoteSeries> {
        let now = self.clock.now();
        let guard = self.map.read().await;
        guard
            .get(key)
            .filter(|entry| is_fresh(entry, now, self.ttl))
            .map(|entry| entry.series.clone())
    }

    /// Stores `series` under `key`, replacing any previous entry.
    pub async fn put(&self, key: CacheKey, series: QuoteSeries) {
        let entry = CacheEntry {
            series,
            inserted_at: self.clock.now(),
        };
        self.map.write().await.insert(key, entry);
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.map.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.map.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.map.write().await.clear();
    }
}
