//! Interface definitions for the search index admin.
//!
//! This module defines the abstract `SearchIndexAdmin` trait that allows
//! for dependency injection and swappable database backend implementations.

mod search_index_admin;

pub use search_index_admin::SearchIndexAdmin;
