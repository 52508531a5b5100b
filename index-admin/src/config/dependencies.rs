//! Dependency initialization and wiring for the index admin tool.

use std::env;
use std::fs;
use std::time::Duration;

use mongodb::bson::{self, Document};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::AdminError;
use index_admin_repository::{IndexAdminService, IndexPollConfig, MongoSearchIndexAdmin};

/// Default MongoDB connection string.
const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";

/// Default database name.
const DEFAULT_DATABASE: &str = "search";

/// Default collection name.
const DEFAULT_COLLECTION: &str = "documents";

/// Default search index name.
const DEFAULT_INDEX_NAME: &str = "default";

/// Default path of the JSON index definition file.
const DEFAULT_DEFINITION_PATH: &str = "index-definition.json";

/// Default wait between index status polls in seconds.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default maximum number of polls before giving up (0 disables the limit).
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 120;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for MongoDB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from environment variable.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive)
    /// Defaults to "retry" if not set or invalid.
    fn from_env() -> Self {
        match env::var("MONGODB_CONNECTION_MODE")
            .unwrap_or_else(|_| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid MONGODB_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured admin service.
    pub service: IndexAdminService,
    /// Name of the index to administer.
    pub index_name: String,
    /// The index definition to apply.
    pub definition: Document,
    /// Token cancelling the polling loops on shutdown.
    pub shutdown: CancellationToken,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MONGODB_URI`: MongoDB connection string (default: mongodb://localhost:27017)
    /// - `MONGODB_DATABASE`: Database name (default: "search")
    /// - `MONGODB_COLLECTION`: Collection name (default: "documents")
    /// - `SEARCH_INDEX_NAME`: Index name (default: "default")
    /// - `SEARCH_INDEX_DEFINITION_PATH`: Path of the JSON index definition
    ///   file (default: index-definition.json)
    /// - `POLL_INTERVAL_SECS`: Wait between status polls in seconds (default: 5)
    /// - `MAX_POLL_ATTEMPTS`: Maximum number of polls before giving up,
    ///   0 polls forever (default: 120)
    /// - `MONGODB_CONNECTION_MODE`: Connection mode - "fail-fast" or "retry" (default: retry)
    /// - `MONGODB_RETRY_INTERVAL_SECS`: Connection retry interval in seconds (default: 15)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AdminError)` - If initialization fails (only in fail-fast mode)
    pub async fn new() -> Result<Self, AdminError> {
        let uri = env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string());
        let database =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
        let collection =
            env::var("MONGODB_COLLECTION").unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());
        let index_name =
            env::var("SEARCH_INDEX_NAME").unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string());
        let definition_path = env::var("SEARCH_INDEX_DEFINITION_PATH")
            .unwrap_or_else(|_| DEFAULT_DEFINITION_PATH.to_string());
        let poll_interval = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);
        let max_attempts = env::var("MAX_POLL_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_POLL_ATTEMPTS);
        let connection_mode = ConnectionMode::from_env();
        let retry_interval = env::var("MONGODB_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);

        info!(
            database = %database,
            collection = %collection,
            index_name = %index_name,
            definition_path = %definition_path,
            poll_interval_secs = poll_interval,
            max_poll_attempts = max_attempts,
            connection_mode = ?connection_mode,
            "Initializing dependencies"
        );

        let definition = Self::load_definition(&definition_path)?;

        // Connect to MongoDB with retry logic
        let admin = Self::connect_to_mongodb(
            &uri,
            &database,
            &collection,
            connection_mode,
            Duration::from_secs(retry_interval),
        )
        .await?;

        info!("MongoDB connection established");

        let shutdown = CancellationToken::new();
        let config = IndexPollConfig {
            poll_interval: Duration::from_secs(poll_interval),
            max_attempts: (max_attempts > 0).then_some(max_attempts),
            cancel: Some(shutdown.clone()),
        };

        let service = IndexAdminService::with_config(Box::new(admin), config);

        Ok(Self {
            service,
            index_name,
            definition,
            shutdown,
        })
    }

    /// Load the JSON index definition file and convert it to BSON.
    fn load_definition(path: &str) -> Result<Document, AdminError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AdminError::config(format!("Failed to read index definition '{}': {}", path, e))
        })?;
        let json: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            AdminError::config(format!("Invalid JSON in index definition '{}': {}", path, e))
        })?;
        bson::to_document(&json).map_err(|e| {
            AdminError::config(format!(
                "Index definition '{}' is not a document: {}",
                path, e
            ))
        })
    }

    /// Connect to MongoDB with retry logic based on connection mode.
    async fn connect_to_mongodb(
        uri: &str,
        database: &str,
        collection: &str,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<MongoSearchIndexAdmin, AdminError> {
        loop {
            match MongoSearchIndexAdmin::connect(uri, database, collection).await {
                Ok(admin) => return Ok(admin),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(AdminError::config(format!(
                            "Failed to connect to MongoDB: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to MongoDB, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}
