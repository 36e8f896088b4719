//! Query cache with generation-based invalidation.
//!
//! Maps a structured query fingerprint to a previously computed result
//! page or single projection. An entry is live only while both hold:
//!
//! - its absolute expiry has not passed, and
//! - the generation captured at `put` time still matches the live
//!   generation counter.
//!
//! Bumping the generation therefore invalidates every resident entry in
//! one atomic step without walking the map. Writers call
//! [`ListingCache::bump_generation`] after their store write is
//! acknowledged; readers never block and a miss is ordinary control flow.
//!
//! ## Concurrency
//!
//! - DashMap for lock-free concurrent `get`/`put`.
//! - The generation is an `AtomicU64`; once a bump returns, no reader can
//!   observe a hit for an entry tagged with an older generation.
//! - A `put` racing a bump may capture the pre-bump generation and land
//!   after it; the entry is then immediately stale. That direction of the
//!   race favors a spurious miss over a stale hit and is left as is.

use dashmap::DashMap;
use showcase_api::ProjectDto;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default time-to-live for cached results. Short by design: tolerate
/// brief staleness for throughput, never long staleness.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

/// Probability (1/N) of sweeping stale entries on insert once the soft
/// capacity is reached.
const CLEANUP_PROBABILITY: u32 = 100;

/// Force a sweep when the map grows past capacity times this factor.
const HARD_CAPACITY_MULTIPLIER: f32 = 1.5;

/// Structured cache key for the two supported query shapes.
///
/// Built only from normalized, clamped parameters, so logically
/// equivalent requests always collide on the same key. Structural
/// hashing avoids the delimiter pitfalls of concatenated string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// A filtered, paginated listing.
    Listing {
        term: String,
        skip: usize,
        take: usize,
    },
    /// A single-record lookup.
    Item { id: Uuid },
}

/// A cached result. `Arc`-wrapped so hits clone cheaply.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Page(Arc<Vec<ProjectDto>>),
    Item(Arc<ProjectDto>),
}

struct CacheEntry {
    value: CachedValue,
    expires_at: Instant,
    generation: u64,
}

/// Counters for monitoring. Updated with relaxed ordering; consistency
/// between individual counters is not required.
#[derive(Debug, Default)]
struct CacheStatistics {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    invalidations: AtomicU64,
    size: AtomicUsize,
}

/// A point-in-time snapshot of cache statistics.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub invalidations: u64,
    pub size: usize,
    pub generation: u64,
}

/// Thread-safe query cache with TTL expiry and generation invalidation.
pub struct ListingCache {
    entries: DashMap<QueryKey, CacheEntry>,
    generation: AtomicU64,
    ttl: Duration,
    capacity: usize,
    stats: CacheStatistics,
}

impl std::fmt::Debug for ListingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCache")
            .field("capacity", &self.capacity)
            .field("size", &self.entries.len())
            .field("ttl", &self.ttl)
            .field("generation", &self.current_generation())
            .finish()
    }
}

impl ListingCache {
    /// Creates a cache with the given soft capacity and the default TTL.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
            generation: AtomicU64::new(0),
            ttl: DEFAULT_TTL,
            capacity,
            stats: CacheStatistics::default(),
        }
    }

    /// Sets the entry time-to-live.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Current value of the invalidation generation. Read-only; the only
    /// mutation path is [`Self::bump_generation`].
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Looks up a cached result.
    ///
    /// Returns `None` for absent, expired, or generation-mismatched
    /// entries; stale entries observed here are removed. Never errors:
    /// a miss means the caller falls through to the store.
    pub fn get(&self, key: &QueryKey) -> Option<CachedValue> {
        let current = self.current_generation();

        if let Some(entry) = self.entries.get(key) {
            let stale = entry.generation != current || Instant::now() >= entry.expires_at;
            if stale {
                // Release the read guard before removing.
                drop(entry);
                self.entries.remove(key);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                self.stats.size.store(self.entries.len(), Ordering::Relaxed);
                return None;
            }

            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            return Some(entry.value.clone());
        }

        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Stores a computed result under `key`.
    ///
    /// The entry is tagged with the generation read now; if a concurrent
    /// bump lands in between, the entry is born stale and the next `get`
    /// discards it. Last write wins on a per-key race.
    pub fn put(&self, key: QueryKey, value: CachedValue) {
        let current_len = self.entries.len();
        if current_len >= self.capacity {
            let hard_limit = (self.capacity as f32 * HARD_CAPACITY_MULTIPLIER) as usize;
            if current_len >= hard_limit || fastrand::u32(0..CLEANUP_PROBABILITY) == 0 {
                self.cleanup_stale();
            }
        }

        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
            generation: self.current_generation(),
        };
        self.entries.insert(key, entry);
        self.stats.insertions.fetch_add(1, Ordering::Relaxed);
        self.stats.size.store(self.entries.len(), Ordering::Relaxed);
    }

    /// Invalidates every live entry in one atomic step.
    pub fn bump_generation(&self) {
        let next = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(generation = next, "cache generation bumped");
    }

    /// Removes entries that are expired or belong to an old generation.
    pub fn cleanup_stale(&self) {
        let current = self.current_generation();
        let now = Instant::now();
        self.entries
            .retain(|_, entry| entry.generation == current && entry.expires_at > now);
        self.stats.size.store(self.entries.len(), Ordering::Relaxed);
    }

    /// Number of physically resident entries (live or not yet swept).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            insertions: self.stats.insertions.load(Ordering::Relaxed),
            invalidations: self.stats.invalidations.load(Ordering::Relaxed),
            size: self.stats.size.load(Ordering::Relaxed),
            generation: self.current_generation(),
        }
    }
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(title: &str) -> ProjectDto {
        ProjectDto {
            id: Uuid::new_v4(),
            title: title.to_string(),
            summary: "summary".to_string(),
            tags: Vec::new(),
            repo_url: None,
            live_url: None,
        }
    }

    fn listing_key(term: &str) -> QueryKey {
        QueryKey::Listing {
            term: term.to_string(),
            skip: 0,
            take: 20,
        }
    }

    fn page(titles: &[&str]) -> CachedValue {
        CachedValue::Page(Arc::new(titles.iter().map(|t| dto(t)).collect()))
    }

    #[test]
    fn put_then_get_returns_stored_value() {
        let cache = ListingCache::new(16);
        cache.put(listing_key("rust"), page(&["Alpha"]));

        match cache.get(&listing_key("rust")) {
            Some(CachedValue::Page(p)) => assert_eq!(p[0].title, "Alpha"),
            other => panic!("expected page hit, got {other:?}"),
        }

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.insertions, 1);
    }

    #[test]
    fn absent_key_misses_without_error() {
        let cache = ListingCache::new(16);
        assert!(cache.get(&listing_key("rust")).is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn bump_invalidates_every_entry_regardless_of_expiry() {
        let cache = ListingCache::new(16);
        cache.put(listing_key("rust"), page(&["Alpha"]));
        cache.put(listing_key("go"), page(&["Beta"]));
        cache.put(
            QueryKey::Item { id: Uuid::new_v4() },
            CachedValue::Item(Arc::new(dto("Gamma"))),
        );

        cache.bump_generation();

        assert!(cache.get(&listing_key("rust")).is_none());
        assert!(cache.get(&listing_key("go")).is_none());
        assert_eq!(cache.stats().generation, 1);
    }

    #[test]
    fn expired_entry_misses_and_is_removed() {
        let cache = ListingCache::new(16).with_ttl(Duration::ZERO);
        cache.put(listing_key("rust"), page(&["Alpha"]));
        assert_eq!(cache.len(), 1);

        assert!(cache.get(&listing_key("rust")).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn distinct_windows_use_distinct_keys() {
        let cache = ListingCache::new(16);
        cache.put(listing_key("rust"), page(&["Alpha"]));

        let other = QueryKey::Listing {
            term: "rust".to_string(),
            skip: 20,
            take: 20,
        };
        assert!(cache.get(&other).is_none());
    }

    #[test]
    fn item_and_listing_keys_never_collide() {
        let cache = ListingCache::new(16);
        let id = Uuid::new_v4();
        cache.put(
            QueryKey::Item { id },
            CachedValue::Item(Arc::new(dto("Alpha"))),
        );

        // A listing whose term happens to be the id string is a different key.
        let listing = QueryKey::Listing {
            term: id.to_string(),
            skip: 0,
            take: 20,
        };
        assert!(cache.get(&listing).is_none());
        assert!(cache.get(&QueryKey::Item { id }).is_some());
    }

    #[test]
    fn put_after_bump_is_live_again() {
        let cache = ListingCache::new(16);
        cache.put(listing_key("rust"), page(&["Alpha"]));
        cache.bump_generation();
        cache.put(listing_key("rust"), page(&["Alpha", "Beta"]));

        match cache.get(&listing_key("rust")) {
            Some(CachedValue::Page(p)) => assert_eq!(p.len(), 2),
            other => panic!("expected fresh page, got {other:?}"),
        }
    }

    #[test]
    fn cleanup_drops_old_generation_entries() {
        let cache = ListingCache::new(16);
        cache.put(listing_key("rust"), page(&["Alpha"]));
        cache.put(listing_key("go"), page(&["Beta"]));
        cache.bump_generation();
        cache.put(listing_key("zig"), page(&["Gamma"]));

        cache.cleanup_stale();
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&listing_key("zig")).is_some());
    }
}
