//! MongoDB implementation of the search index admin.
//!
//! This module provides a concrete implementation of `SearchIndexAdmin`
//! using the official MongoDB driver.

mod provider;

pub use provider::MongoSearchIndexAdmin;
