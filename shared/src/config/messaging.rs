//! Messaging fabric configuration

use serde::{Deserialize, Serialize};

/// Configuration for the request/response messaging fabric
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessagingConfig {
    /// How long a request waits for its correlated response, in seconds
    pub request_timeout_secs: u64,

    /// Capacity of each queue's in-flight channel
    pub queue_capacity: usize,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            queue_capacity: 64,
        }
    }
}

impl MessagingConfig {
    /// Set the request timeout
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let request_timeout_secs = std::env::var("MESSAGING_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.request_timeout_secs);
        let queue_capacity = std::env::var("MESSAGING_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.queue_capacity);

        Self {
            request_timeout_secs,
            queue_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messaging_config_default() {
        let config = MessagingConfig::default();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.queue_capacity, 64);
    }
}
