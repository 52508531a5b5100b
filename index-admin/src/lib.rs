//! # Index Admin
//!
//! Administration tool for search indexes - ensures a named index exists
//! with the definition configured on disk, then waits until the server
//! reports the index ready.
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization

pub mod config;

pub use config::Dependencies;

use index_admin_repository::IndexAdminError;
use thiserror::Error;

/// Errors that can occur during tool initialization or execution.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Index administration error.
    #[error("Index admin error: {0}")]
    IndexAdminError(#[from] IndexAdminError),
}

impl AdminError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
