use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use showcase_core::Project;
use showcase_storage::{ProjectQuery, ProjectStore, StorageError};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory catalog store using a papaya lock-free HashMap.
///
/// Reads never block writers and vice versa; listing collects a snapshot
/// under a pin guard and sorts it newest-first.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    data: Arc<PapayaHashMap<Uuid, Project>>,
}

impl InMemoryProjectStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(PapayaHashMap::new()),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.data.pin().iter().count()
    }

    /// True if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn find_many(&self, query: &ProjectQuery) -> Result<Vec<Project>, StorageError> {
        let guard = self.data.pin();

        let mut matches: Vec<Project> = guard
            .iter()
            .filter(|(_, p)| p.matches_term(&query.term))
            .map(|(_, p)| p.clone())
            .collect();

        // Newest first; identifier as tie-break so pagination is stable
        // across calls within the same instant.
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(matches
            .into_iter()
            .skip(query.skip)
            .take(query.take)
            .collect())
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Project>, StorageError> {
        let guard = self.data.pin();
        Ok(guard.get(&id).cloned())
    }

    async fn insert(&self, project: &Project) -> Result<(), StorageError> {
        let guard = self.data.pin();

        if guard.get(&project.id).is_some() {
            return Err(StorageError::already_exists(project.id.to_string()));
        }

        guard.insert(project.id, project.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StorageError> {
        let guard = self.data.pin();
        Ok(guard.remove(&id).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
