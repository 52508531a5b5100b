//! Polling configuration for index administration operations.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Default wait between polls of the index listing.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Default maximum number of polls before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;

/// Configuration for the polling loops of the index admin service.
///
/// Index builds and deletions complete asynchronously on the server, so
/// both service operations observe progress by re-fetching the index
/// listing at a fixed interval. This struct controls that pacing, bounds
/// the number of polls, and optionally carries a cancellation token that
/// aborts a wait between polls.
#[derive(Debug, Clone)]
pub struct IndexPollConfig {
    /// Wait between two polls of the index listing.
    pub poll_interval: Duration,

    /// Maximum number of polls before the operation gives up with a
    /// timeout error.
    ///
    /// Set to `None` to poll until the index reaches the expected state,
    /// however long that takes. Defaults to 120 polls.
    pub max_attempts: Option<u32>,

    /// Optional token cancelling the operation between polls.
    pub cancel: Option<CancellationToken>,
}

impl Default for IndexPollConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            cancel: None,
        }
    }
}

impl IndexPollConfig {
    /// Create a config with no attempt limit.
    ///
    /// # Warning
    ///
    /// Use with caution. Without a limit the polling loops run until the
    /// index reaches the expected state, which may be never if the remote
    /// operation is stuck. Not recommended for unattended use.
    ///
    /// # Returns
    ///
    /// An `IndexPollConfig` with `max_attempts` set to `None`.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            ..Self::default()
        }
    }

    /// Create a config with a custom attempt limit.
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Maximum number of polls before giving up
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexPollConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.max_attempts, Some(120));
        assert!(config.cancel.is_none());
    }

    #[test]
    fn test_unbounded_config() {
        let config = IndexPollConfig::unbounded();
        assert_eq!(config.max_attempts, None);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_with_max_attempts() {
        let config = IndexPollConfig::with_max_attempts(3);
        assert_eq!(config.max_attempts, Some(3));
    }
}
