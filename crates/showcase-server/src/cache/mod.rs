//! Read-path caching for listing and lookup queries.

pub mod listing;

pub use listing::{CacheStatsSnapshot, CachedValue, ListingCache, QueryKey};
