//! Write path: persist, then invalidate.
//!
//! Authorization is a precondition here: handlers only reach these
//! methods with an `Owner`-checked caller context, so nothing is
//! re-checked.
//!
//! The store write and the generation bump are two sequential steps, not
//! one transaction. The bump itself is an infallible atomic increment,
//! so the only loss mode is a process crash between the two; cached
//! pages then linger at most until their TTL. That bounded-staleness
//! window is accepted rather than papered over with a write-ahead log.

use std::sync::Arc;

use showcase_core::{Project, ProjectDraft};
use showcase_storage::{ProjectStore, StorageError};
use uuid::Uuid;

use crate::cache::ListingCache;

/// Creates and deletes catalog entries, invalidating the read cache
/// after every effective write.
pub struct MutationService {
    store: Arc<dyn ProjectStore>,
    cache: Arc<ListingCache>,
}

impl MutationService {
    pub fn new(store: Arc<dyn ProjectStore>, cache: Arc<ListingCache>) -> Self {
        Self { store, cache }
    }

    /// Persists a new entry and invalidates all cached read results.
    ///
    /// The bump happens strictly after the store acknowledges the insert;
    /// bumping first would let a concurrent reader repopulate the cache
    /// from pre-write state.
    pub async fn create(&self, draft: ProjectDraft) -> Result<Project, StorageError> {
        let project = Project::create(draft);
        self.store.insert(&project).await?;
        self.cache.bump_generation();

        tracing::info!(id = %project.id, title = %project.title, "project created");
        Ok(project)
    }

    /// Removes an entry by identifier.
    ///
    /// Returns `false` (and bumps nothing) when no such record exists;
    /// no-op writes must not churn the cache.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let removed = self.store.delete(id).await?;
        if removed {
            self.cache.bump_generation();
            tracing::info!(%id, "project deleted");
        } else {
            tracing::debug!(%id, "delete of nonexistent project ignored");
        }
        Ok(removed)
    }
}
