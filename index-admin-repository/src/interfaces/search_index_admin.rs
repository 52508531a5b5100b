//! Search index admin trait definition.
//!
//! This module defines the abstract interface for search index lifecycle
//! operations, allowing for different database backend implementations.

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::errors::IndexAdminError;
use crate::types::IndexDescriptor;

/// Abstracts the index-management surface of the remote database.
///
/// This trait defines the interface for all search index backend
/// implementations. Implementations are injected into `IndexAdminService`
/// to enable dependency injection and easy testing with mock
/// implementations.
///
/// All methods return `Result<T, IndexAdminError>` for consistent error
/// handling across different backend implementations.
#[async_trait]
pub trait SearchIndexAdmin: Send + Sync {
    /// Create a search index with the given name and definition.
    ///
    /// Index builds are asynchronous on the server: a successful return
    /// means the creation request was accepted, not that the index is
    /// queryable. Observe build progress through `list_indexes`.
    ///
    /// # Arguments
    ///
    /// * `name` - The index name, unique within the collection
    /// * `definition` - Opaque index definition, passed through unmodified
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the creation request was accepted
    /// * `Err(IndexAdminError::AlreadyExists)` - If an index of that name exists
    /// * `Err(IndexAdminError)` - If the request fails
    async fn create_index(&self, name: &str, definition: &Document)
        -> Result<(), IndexAdminError>;

    /// Drop a search index by name.
    ///
    /// Deletion is asynchronous: the index may keep appearing in
    /// `list_indexes` for a while after this returns. Poll the listing to
    /// confirm the index is gone.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the index to drop
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the drop request was accepted
    /// * `Err(IndexAdminError)` - If the request fails
    async fn drop_index(&self, name: &str) -> Result<(), IndexAdminError>;

    /// List all search indexes of the collection.
    ///
    /// Returns the current full set of index descriptors. Callers observe
    /// asynchronous index operations by re-fetching this listing rather
    /// than caching it.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<IndexDescriptor>)` - One descriptor per index
    /// * `Err(IndexAdminError)` - If the listing fails
    async fn list_indexes(&self) -> Result<Vec<IndexDescriptor>, IndexAdminError>;
}
