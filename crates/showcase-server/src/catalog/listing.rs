//! Cache-then-store read path for listings and single lookups.

use std::sync::Arc;

use showcase_api::ProjectDto;
use showcase_storage::{ProjectQuery, ProjectStore, StorageError};
use uuid::Uuid;

use crate::cache::{CachedValue, ListingCache, QueryKey};

/// Page size applied when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on any requested page size; protects the store from
/// unbounded scans.
pub const MAX_PAGE_SIZE: i64 = 50;

/// Serves listing and lookup queries through the cache.
pub struct ListingService {
    store: Arc<dyn ProjectStore>,
    cache: Arc<ListingCache>,
}

impl ListingService {
    pub fn new(store: Arc<dyn ProjectStore>, cache: Arc<ListingCache>) -> Self {
        Self { store, cache }
    }

    /// Returns a page of projections, newest first.
    ///
    /// The search term is normalized (absent and blank collapse to the
    /// same canonical empty term) and the window clamped before the
    /// fingerprint is computed, so equivalent requests share one cache
    /// entry. Misses query the store and always populate the cache,
    /// empty pages included.
    pub async fn list(
        &self,
        term: Option<&str>,
        skip: i64,
        take: i64,
    ) -> Result<Arc<Vec<ProjectDto>>, StorageError> {
        let term = normalize_term(term);
        let skip = clamp_skip(skip);
        let take = clamp_take(take);

        let key = QueryKey::Listing {
            term: term.clone(),
            skip,
            take,
        };
        if let Some(CachedValue::Page(page)) = self.cache.get(&key) {
            return Ok(page);
        }

        let rows = self
            .store
            .find_many(&ProjectQuery::new(term, skip, take))
            .await?;
        let page: Arc<Vec<ProjectDto>> = Arc::new(rows.iter().map(ProjectDto::from).collect());

        self.cache.put(key, CachedValue::Page(Arc::clone(&page)));
        Ok(page)
    }

    /// Looks up one projection by identifier.
    ///
    /// Absence is `Ok(None)`, not an error, and is not cached; only
    /// found records are written back.
    pub async fn get(&self, id: Uuid) -> Result<Option<Arc<ProjectDto>>, StorageError> {
        let key = QueryKey::Item { id };
        if let Some(CachedValue::Item(dto)) = self.cache.get(&key) {
            return Ok(Some(dto));
        }

        let Some(project) = self.store.find_one(id).await? else {
            return Ok(None);
        };

        let dto = Arc::new(ProjectDto::from(&project));
        self.cache.put(key, CachedValue::Item(Arc::clone(&dto)));
        Ok(Some(dto))
    }
}

/// Absent and blank terms collapse to the canonical empty term.
fn normalize_term(term: Option<&str>) -> String {
    term.map(str::trim).unwrap_or_default().to_string()
}

fn clamp_skip(skip: i64) -> usize {
    skip.max(0) as usize
}

fn clamp_take(take: i64) -> usize {
    take.clamp(1, MAX_PAGE_SIZE) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::{Project, ProjectDraft};
    use showcase_db_memory::InMemoryProjectStore;

    fn draft(title: &str) -> ProjectDraft {
        ProjectDraft {
            title: title.to_string(),
            summary: "summary".to_string(),
            tags: Vec::new(),
            repo_url: None,
            live_url: None,
        }
    }

    async fn service_with(titles: &[&str]) -> (ListingService, Arc<ListingCache>) {
        let store = Arc::new(InMemoryProjectStore::new());
        for title in titles {
            store.insert(&Project::create(draft(title))).await.unwrap();
        }
        let cache = Arc::new(ListingCache::new(64));
        (
            ListingService::new(store, Arc::clone(&cache)),
            cache,
        )
    }

    #[test]
    fn clamps_window_parameters() {
        assert_eq!(clamp_skip(-5), 0);
        assert_eq!(clamp_skip(7), 7);
        assert_eq!(clamp_take(0), 1);
        assert_eq!(clamp_take(-3), 1);
        assert_eq!(clamp_take(1000), 50);
        assert_eq!(clamp_take(20), 20);
    }

    #[test]
    fn absent_and_blank_terms_normalize_identically() {
        assert_eq!(normalize_term(None), "");
        assert_eq!(normalize_term(Some("")), "");
        assert_eq!(normalize_term(Some("   ")), "");
        assert_eq!(normalize_term(Some("  rust ")), "rust");
    }

    #[tokio::test]
    async fn equivalent_requests_share_one_cache_entry() {
        let (svc, cache) = service_with(&["Alpha"]).await;

        svc.list(None, 0, 20).await.unwrap();
        svc.list(Some(""), 0, 20).await.unwrap();
        svc.list(Some("   "), -1, 20).await.unwrap();

        let stats = cache.stats();
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.hits, 2);
    }

    #[tokio::test]
    async fn second_list_is_served_from_cache() {
        let (svc, cache) = service_with(&["Alpha", "Beta"]).await;

        let first = svc.list(Some("alpha"), 0, 20).await.unwrap();
        let second = svc.list(Some("alpha"), 0, 20).await.unwrap();

        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn empty_result_pages_are_cached() {
        let (svc, cache) = service_with(&["Alpha"]).await;

        let empty = svc.list(Some("no-such-term"), 0, 20).await.unwrap();
        assert!(empty.is_empty());
        assert_eq!(cache.stats().insertions, 1);

        svc.list(Some("no-such-term"), 0, 20).await.unwrap();
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn lookup_caches_found_records_only() {
        let store = Arc::new(InMemoryProjectStore::new());
        let project = Project::create(draft("Alpha"));
        store.insert(&project).await.unwrap();
        let cache = Arc::new(ListingCache::new(64));
        let svc = ListingService::new(store, Arc::clone(&cache));

        let missing = svc.get(Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
        assert_eq!(cache.len(), 0);

        let found = svc.get(project.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Alpha");
        assert_eq!(cache.len(), 1);

        let again = svc.get(project.id).await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&found, &again));
    }
}
