//! Client configuration types.

use std::time::Duration;

/// Base URL used when `API_HOST` is unset
pub const DEFAULT_API_HOST: &str = "http://localhost:7000";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the data service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the data service
    pub api_host: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_API_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
