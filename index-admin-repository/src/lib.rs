//! # Index Admin Repository
//!
//! This crate provides traits and implementations for administering
//! search indexes on a MongoDB deployment. It includes definitions for
//! errors, interfaces, a concrete MongoDB implementation, and the
//! service driving index creation and readiness polling.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod mongo;
pub mod service;
pub mod types;

pub use config::IndexPollConfig;
pub use errors::IndexAdminError;
pub use interfaces::SearchIndexAdmin;
pub use mongo::MongoSearchIndexAdmin;
pub use service::IndexAdminService;
pub use types::{IndexDescriptor, IndexStatus};
