//! Search index admin service implementation.
//!
//! This module provides the main service for administering search
//! indexes: ensuring a named index exists with a given definition, and
//! waiting until the server reports an index ready.
//!
//! Both operations observe asynchronous server-side work (index builds
//! and deletions) by polling the index listing at a configured interval.

use mongodb::bson::Document;
use tokio::time::sleep;
use tracing::info;

use crate::config::IndexPollConfig;
use crate::errors::IndexAdminError;
use crate::interfaces::SearchIndexAdmin;
use crate::types::IndexStatus;

/// The main service for administering search indexes.
///
/// This is the high-level API that application code should use. It
/// provides input validation and the index lifecycle logic, and delegates
/// the actual database commands to a `SearchIndexAdmin` implementation.
/// All operations return `IndexAdminError` for consistent error handling.
///
/// # Example
///
/// ```no_run
/// use index_admin_repository::{IndexAdminService, MongoSearchIndexAdmin};
/// use mongodb::bson::doc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
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
/// let effective = service.wait_for_ready("default").await?;
/// # Ok(())
/// # }
/// ```
pub struct IndexAdminService {
    admin: Box<dyn SearchIndexAdmin>,
    config: IndexPollConfig,
}

impl IndexAdminService {
    /// Create a new IndexAdminService with default polling configuration.
    ///
    /// The default configuration polls every 5 seconds and gives up after
    /// 120 polls.
    ///
    /// # Arguments
    ///
    /// * `admin` - A boxed implementation of `SearchIndexAdmin` (e.g.,
    ///   `MongoSearchIndexAdmin`)
    pub fn new(admin: Box<dyn SearchIndexAdmin>) -> Self {
        Self {
            admin,
            config: IndexPollConfig::default(),
        }
    }

    /// Create a new IndexAdminService with custom polling configuration.
    ///
    /// Use this to change the poll interval, the attempt budget, or to
    /// attach a cancellation token.
    ///
    /// # Arguments
    ///
    /// * `admin` - A boxed implementation of `SearchIndexAdmin`
    /// * `config` - Custom polling configuration for the service
    pub fn with_config(admin: Box<dyn SearchIndexAdmin>, config: IndexPollConfig) -> Self {
        Self { admin, config }
    }

    /// Check that an index name is usable as a lookup key.
    fn validate_index_name(name: &str) -> Result<(), IndexAdminError> {
        if name.trim().is_empty() {
            return Err(IndexAdminError::validation("index name is required"));
        }
        Ok(())
    }

    /// Ensure the named search index exists with the given definition,
    /// replacing any prior definition under the same name.
    ///
    /// Attempts the creation directly first. If the server reports that
    /// the name is taken, the existing index is dropped, the listing is
    /// polled until the deletion is confirmed, and the index is created
    /// again with the new definition. Success is side-effect only; the
    /// index may still be building when this returns — use
    /// `wait_for_ready` to block until it is queryable.
    ///
    /// # Arguments
    ///
    /// * `name` - The index name, unique within the collection
    /// * `definition` - Opaque index definition, passed through unmodified
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created or recreated
    /// * `Err(IndexAdminError::ValidationError)` - If the name is empty
    /// * `Err(IndexAdminError::RecreateError)` - If any step of the
    ///   replace path fails (drop, deletion polling, or re-create)
    /// * `Err(IndexAdminError)` - If the initial creation fails for a
    ///   reason other than the name being taken
    pub async fn ensure_index(
        &self,
        name: &str,
        definition: &Document,
    ) -> Result<(), IndexAdminError> {
        Self::validate_index_name(name)?;

        info!(index = %name, "Creating search index");
        match self.admin.create_index(name, definition).await {
            Ok(()) => Ok(()),
            Err(IndexAdminError::AlreadyExists(_)) => {
                info!(index = %name, "Search index already exists, recreating");
                self.recreate_index(name, definition)
                    .await
                    .map_err(|e| IndexAdminError::recreate(name, e))
            }
            Err(e) => Err(e),
        }
    }

    /// Drop the existing index, wait for the deletion to be observable,
    /// and create the replacement.
    async fn recreate_index(
        &self,
        name: &str,
        definition: &Document,
    ) -> Result<(), IndexAdminError> {
        info!(index = %name, "Dropping search index");
        self.admin.drop_index(name).await?;

        self.await_deletion(name).await?;

        info!(index = %name, "Creating replacement search index");
        self.admin.create_index(name, definition).await?;

        info!(index = %name, "Search index recreated");
        Ok(())
    }

    /// Poll the index listing until the named index is gone.
    ///
    /// The server does not delete synchronously; the drop is only
    /// confirmed once the name stops appearing in the listing.
    async fn await_deletion(&self, name: &str) -> Result<(), IndexAdminError> {
        let mut attempts = 0u32;
        loop {
            let indexes = self.admin.list_indexes().await?;
            if !indexes.iter().any(|index| index.name == name) {
                info!(index = %name, "Search index deletion confirmed");
                return Ok(());
            }

            attempts += 1;
            self.check_attempt_budget(name, attempts)?;
            info!(
                index = %name,
                attempt = attempts,
                "Waiting for search index deletion"
            );
            self.poll_delay().await?;
        }
    }

    /// Block until the named index reports status `READY`, returning the
    /// definition the server is applying.
    ///
    /// The listing is re-fetched at the configured interval. An index
    /// that has not appeared yet (creation still propagating) is treated
    /// the same as one still building: narrate and poll again. A `FAILED`
    /// status is terminal and surfaces as an error rather than polling
    /// forever.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the index to observe
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The ready index's effective definition,
    ///   unchanged from what the server reported
    /// * `Err(IndexAdminError::BuildFailed)` - If the server reports a
    ///   permanent build failure
    /// * `Err(IndexAdminError::WaitTimeout)` - If the attempt budget is
    ///   exhausted first
    /// * `Err(IndexAdminError)` - If a listing fetch fails (listing
    ///   errors are not retried)
    pub async fn wait_for_ready(&self, name: &str) -> Result<Document, IndexAdminError> {
        Self::validate_index_name(name)?;

        let mut attempts = 0u32;
        loop {
            let indexes = self.admin.list_indexes().await?;
            match indexes.into_iter().find(|index| index.name == name) {
                None => {
                    info!(index = %name, "Search index not found yet");
                }
                Some(descriptor) => match descriptor.status {
                    IndexStatus::Ready => {
                        info!(
                            index = %name,
                            definition = %descriptor.latest_definition,
                            "Search index ready"
                        );
                        return Ok(descriptor.latest_definition);
                    }
                    IndexStatus::Failed => {
                        return Err(IndexAdminError::build_failed(name));
                    }
                    status => {
                        info!(index = %name, status = %status, "Search index not ready");
                    }
                },
            }

            attempts += 1;
            self.check_attempt_budget(name, attempts)?;
            self.poll_delay().await?;
        }
    }

    /// Fail once the configured attempt budget is spent.
    fn check_attempt_budget(&self, name: &str, attempts: u32) -> Result<(), IndexAdminError> {
        match self.config.max_attempts {
            Some(max) if attempts >= max => Err(IndexAdminError::wait_timeout(name, attempts)),
            _ => Ok(()),
        }
    }

    /// Sleep for one poll interval, aborting early if the cancellation
    /// token fires.
    async fn poll_delay(&self) -> Result<(), IndexAdminError> {
        match &self.config.cancel {
            Some(cancel) => {
                tokio::select! {
                    _ = cancel.cancelled() => Err(IndexAdminError::Cancelled),
                    _ = sleep(self.config.poll_interval) => Ok(()),
                }
            }
            None => {
                sleep(self.config.poll_interval).await;
                Ok(())
            }
        }
    }
}
