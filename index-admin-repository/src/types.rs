//! Index descriptors and status values reported by the remote service.

use std::fmt;

use mongodb::bson::Document;

/// Build status of a search index as reported by the server.
///
/// The server defines these values; anything this crate does not know is
/// carried through as [`IndexStatus::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    /// The build has been requested but has not started.
    Pending,
    /// The index is being built or rebuilt.
    Building,
    /// The index is queryable and up to date with its definition.
    Ready,
    /// The build failed; the index will not become queryable.
    Failed,
    /// The index is being removed.
    Deleting,
    /// A status value not known to this crate.
    Other(String),
}

impl IndexStatus {
    /// Parse a status from the server's wire representation.
    pub fn parse(value: &str) -> Self {
        match value {
            "PENDING" => Self::Pending,
            "BUILDING" => Self::Building,
            "READY" => Self::Ready,
            "FAILED" => Self::Failed,
            "DELETING" => Self::Deleting,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for IndexStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Building => write!(f, "BUILDING"),
            Self::Ready => write!(f, "READY"),
            Self::Failed => write!(f, "FAILED"),
            Self::Deleting => write!(f, "DELETING"),
            Self::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Snapshot of one search index as reported by the server.
///
/// Descriptors are read-only: they are re-fetched from the server on
/// every poll and never mutated by this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDescriptor {
    /// The index name, unique within the collection's index namespace.
    pub name: String,
    /// Current build status.
    pub status: IndexStatus,
    /// The definition the server is currently applying.
    pub latest_definition: Document,
}
