//! MongoDB provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexAdmin`
//! using the MongoDB driver's search index management API.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, SearchIndexModel};
use tracing::{debug, info};

use crate::errors::IndexAdminError;
use crate::interfaces::SearchIndexAdmin;
use crate::types::{IndexDescriptor, IndexStatus};

/// MongoDB implementation of the search index admin.
///
/// Wraps a collection handle and drives the server's search index
/// commands (`createSearchIndexes`, `dropSearchIndex`,
/// `$listSearchIndexes`) through the official driver.
///
/// # Example
///
/// ```ignore
/// use index_admin_repository::{IndexAdminService, MongoSearchIndexAdmin};
/// use mongodb::bson::doc;
///
/// let admin = MongoSearchIndexAdmin::connect(
///     "mongodb://localhost:27017",
///     "search",
///     "documents",
/// )
/// .await?;
/// let service = IndexAdminService::new(Box::new(admin));
///
/// let definition = doc! { "mappings": { "dynamic": true } };
/// service.ensure_index("default", &definition).await?;
/// service.wait_for_ready("default").await?;
/// ```
pub struct MongoSearchIndexAdmin {
    collection: Collection<Document>,
}

impl MongoSearchIndexAdmin {
    /// Wrap an already-selected collection handle.
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    /// Connect to a deployment and select the target collection.
    ///
    /// Verifies the deployment is reachable with a `ping` command before
    /// returning.
    ///
    /// # Arguments
    ///
    /// * `uri` - MongoDB connection string (e.g., "mongodb://localhost:27017")
    /// * `database` - Database holding the collection
    /// * `collection` - Collection whose search indexes are administered
    ///
    /// # Returns
    ///
    /// * `Ok(MongoSearchIndexAdmin)` - A new admin instance
    /// * `Err(IndexAdminError::ConnectionError)` - If connection setup fails
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, IndexAdminError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| IndexAdminError::connection(e.to_string()))?;

        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| IndexAdminError::connection(e.to_string()))?;

        info!(
            database = %database,
            collection = %collection,
            "Connected to MongoDB deployment"
        );

        Ok(Self::new(db.collection::<Document>(collection)))
    }

    /// Parse one raw listing document into an index descriptor.
    ///
    /// The server omits `latestDefinition` while it is still registering
    /// an index, so that field falls back to an empty document.
    fn parse_descriptor(document: &Document) -> Result<IndexDescriptor, IndexAdminError> {
        let name = document
            .get_str("name")
            .map_err(|_| IndexAdminError::parse("index descriptor is missing 'name'"))?
            .to_string();

        let status = document.get_str("status").map(IndexStatus::parse).map_err(|_| {
            IndexAdminError::parse(format!("index descriptor '{}' is missing 'status'", name))
        })?;

        let latest_definition = document
            .get_document("latestDefinition")
            .cloned()
            .unwrap_or_default();

        Ok(IndexDescriptor {
            name,
            status,
            latest_definition,
        })
    }
}

#[async_trait]
impl SearchIndexAdmin for MongoSearchIndexAdmin {
    async fn create_index(
        &self,
        name: &str,
        definition: &Document,
    ) -> Result<(), IndexAdminError> {
        let model = SearchIndexModel::builder()
            .name(name.to_string())
            .definition(definition.clone())
            .build();

        match self.collection.create_search_index(model).await {
            Ok(created) => {
                debug!(index = %created, "Search index creation accepted");
                Ok(())
            }
            // A duplicate name surfaces as a server-side command failure;
            // transport-level errors do not carry a command response.
            Err(e) if matches!(*e.kind, ErrorKind::Command(_)) => {
                Err(IndexAdminError::already_exists(name))
            }
            Err(e) => Err(IndexAdminError::create(e.to_string())),
        }
    }

    async fn drop_index(&self, name: &str) -> Result<(), IndexAdminError> {
        self.collection
            .drop_search_index(name)
            .await
            .map_err(|e| IndexAdminError::drop(e.to_string()))
    }

    async fn list_indexes(&self) -> Result<Vec<IndexDescriptor>, IndexAdminError> {
        let cursor = self
            .collection
            .list_search_indexes()
            .await
            .map_err(|e| IndexAdminError::list(e.to_string()))?;

        let raw: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| IndexAdminError::list(e.to_string()))?;

        raw.iter().map(Self::parse_descriptor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_descriptor() {
        let raw = doc! {
            "id": "65c1b2f3a1b2c3d4e5f6a7b8",
            "name": "default",
            "status": "READY",
            "queryable": true,
            "latestDefinition": { "mappings": { "dynamic": true } },
        };

        let descriptor = MongoSearchIndexAdmin::parse_descriptor(&raw).unwrap();

        assert_eq!(descriptor.name, "default");
        assert_eq!(descriptor.status, IndexStatus::Ready);
        assert_eq!(
            descriptor.latest_definition,
            doc! { "mappings": { "dynamic": true } }
        );
    }

    #[test]
    fn test_parse_descriptor_unknown_status() {
        let raw = doc! {
            "name": "default",
            "status": "MIGRATING",
            "latestDefinition": {},
        };

        let descriptor = MongoSearchIndexAdmin::parse_descriptor(&raw).unwrap();

        assert_eq!(
            descriptor.status,
            IndexStatus::Other("MIGRATING".to_string())
        );
    }

    #[test]
    fn test_parse_descriptor_without_definition() {
        let raw = doc! {
            "name": "default",
            "status": "PENDING",
        };

        let descriptor = MongoSearchIndexAdmin::parse_descriptor(&raw).unwrap();

        assert_eq!(descriptor.status, IndexStatus::Pending);
        assert!(descriptor.latest_definition.is_empty());
    }

    #[test]
    fn test_parse_descriptor_missing_name() {
        let raw = doc! { "status": "READY" };

        let result = MongoSearchIndexAdmin::parse_descriptor(&raw);

        assert!(matches!(
            result.unwrap_err(),
            IndexAdminError::ParseError(_)
        ));
    }

    #[test]
    fn test_parse_descriptor_missing_status() {
        let raw = doc! { "name": "default" };

        let result = MongoSearchIndexAdmin::parse_descriptor(&raw);

        assert!(matches!(
            result.unwrap_err(),
            IndexAdminError::ParseError(_)
        ));
    }
}
