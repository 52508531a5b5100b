//! Error types for the index admin repository.
//!
//! This module provides a unified error type for all search index
//! administration operations.

mod index_admin_error;

pub use index_admin_error::IndexAdminError;
