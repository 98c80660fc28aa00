//! Single-slot cache for the rendered insured list.
//!
//! The slot is global to the process, not keyed by query: whichever list
//! summary was fetched last is the one served. Entries are never evicted;
//! an expired entry stays in the slot so it can be served when the
//! upstream API is unavailable.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Default freshness window (5 minutes).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// The cached summary and when it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub summary: String,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry is younger than `ttl` at `now`.
    ///
    /// An entry stamped in the future (clock moved backwards) counts as fresh.
    #[must_use]
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.fetched_at).to_std() {
            Ok(age) => age < ttl,
            Err(_) => true,
        }
    }
}

/// Process-wide store for the last successful list summary.
///
/// The lock only guards individual reads and writes. Callers fetch without
/// holding it, so concurrent misses may both fetch and the last write wins.
#[derive(Debug)]
pub struct SummaryCache {
    ttl: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl SummaryCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached summary if it is still fresh.
    pub async fn fresh(&self) -> Option<String> {
        self.fresh_at(Utc::now()).await
    }

    /// The cached summary if it is fresh at `now`.
    pub async fn fresh_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|entry| entry.is_fresh_at(now, self.ttl))
            .map(|entry| entry.summary.clone())
    }

    /// The cached summary regardless of age.
    pub async fn last(&self) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|entry| entry.summary.clone())
    }

    /// A copy of the current entry.
    pub async fn entry(&self) -> Option<CacheEntry> {
        self.slot.read().await.clone()
    }

    /// Replace the slot with `summary`, stamped now.
    pub async fn store(&self, summary: String) {
        self.store_at(summary, Utc::now()).await;
    }

    /// Replace the slot with `summary`, stamped `fetched_at`.
    pub async fn store_at(&self, summary: String, fetched_at: DateTime<Utc>) {
        *self.slot.write().await = Some(CacheEntry {
            summary,
            fetched_at,
        });
    }
}
