//! Search index administration error types.
//!
//! This module defines the unified error type for all index lifecycle
//! operations, including both low-level driver errors and the
//! distinguished conditions the service logic matches on.

use thiserror::Error;

/// Unified errors from search index administration operations.
///
/// Used by the `SearchIndexAdmin` trait and `IndexAdminService` for all
/// index lifecycle operations. `AlreadyExists` is the distinguished
/// create failure that triggers the replace path; it is recovered
/// internally by `ensure_index` and never surfaced to its caller.
#[derive(Debug, Clone, Error)]
pub enum IndexAdminError {
    /// Validation error (e.g., empty index name).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// An index with the requested name already exists.
    #[error("Search index '{0}' already exists")]
    AlreadyExists(String),

    /// Failed to establish a connection to the database deployment.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to create a search index.
    #[error("Index creation error: {0}")]
    CreateError(String),

    /// Failed to drop a search index.
    #[error("Index drop error: {0}")]
    DropError(String),

    /// Failed to list search indexes.
    #[error("Index listing error: {0}")]
    ListError(String),

    /// Failed to parse an index descriptor returned by the server.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A failure occurred while replacing an existing index.
    #[error("Error during recreation of search index '{name}': {source}")]
    RecreateError {
        /// Name of the index being replaced.
        name: String,
        /// The underlying drop, polling, or re-create failure.
        #[source]
        source: Box<IndexAdminError>,
    },

    /// The polling budget was exhausted before the index reached the
    /// expected state.
    #[error("Search index '{name}' did not reach the expected state after {attempts} polls")]
    WaitTimeout {
        /// Name of the index being observed.
        name: String,
        /// Number of polls performed before giving up.
        attempts: u32,
    },

    /// The server reported a permanent build failure for the index.
    #[error("Search index '{0}' failed to build")]
    BuildFailed(String),

    /// The operation was cancelled via its cancellation token.
    #[error("Operation cancelled")]
    Cancelled,
}

impl IndexAdminError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an already-exists error for the named index.
    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists(name.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn create(msg: impl Into<String>) -> Self {
        Self::CreateError(msg.into())
    }

    /// Create an index drop error.
    pub fn drop(msg: impl Into<String>) -> Self {
        Self::DropError(msg.into())
    }

    /// Create an index listing error.
    pub fn list(msg: impl Into<String>) -> Self {
        Self::ListError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Wrap a replace-path failure for the named index.
    pub fn recreate(name: impl Into<String>, source: IndexAdminError) -> Self {
        Self::RecreateError {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Create a wait-timeout error for the named index.
    pub fn wait_timeout(name: impl Into<String>, attempts: u32) -> Self {
        Self::WaitTimeout {
            name: name.into(),
            attempts,
        }
    }

    /// Create a build-failed error for the named index.
    pub fn build_failed(name: impl Into<String>) -> Self {
        Self::BuildFailed(name.into())
    }
}
