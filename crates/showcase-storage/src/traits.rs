//! Storage traits for the catalog storage abstraction layer.

use async_trait::async_trait;
use showcase_core::Project;
use uuid::Uuid;

use crate::error::StorageError;
use crate::types::ProjectQuery;

/// The record store behind the catalog. Implementations must be
/// thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use showcase_storage::{ProjectStore, StorageError};
///
/// async fn exists(store: &dyn ProjectStore, id: uuid::Uuid) -> Result<bool, StorageError> {
///     Ok(store.find_one(id).await?.is_some())
/// }
/// ```
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Returns the page of projects matching `query`, ordered by creation
    /// time descending (newest first).
    ///
    /// An empty result is a normal outcome, not an error.
    async fn find_many(&self, query: &ProjectQuery) -> Result<Vec<Project>, StorageError>;

    /// Reads a project by identifier.
    ///
    /// Returns `None` if no such record exists.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// records.
    async fn find_one(&self, id: Uuid) -> Result<Option<Project>, StorageError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AlreadyExists` if a record with the same
    /// identifier exists.
    async fn insert(&self, project: &Project) -> Result<(), StorageError>;

    /// Deletes a record by identifier.
    ///
    /// Returns `true` if a record was removed, `false` if none existed.
    async fn delete(&self, id: Uuid) -> Result<bool, StorageError>;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}
