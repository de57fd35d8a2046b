//! Poller timing settings

use std::time::Duration;

use common::error::{Error, Result};
use provider_config::defaults;
use provider_config::PollerConfig;

/// Interval and deadline of one task wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    /// Time between two status queries
    pub interval: Duration,

    /// Total time before giving up
    pub timeout: Duration,
}

impl PollerSettings {
    /// Creates settings with the given interval and timeout
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Checks that at least one status query fits before the deadline
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::InvalidArgument("poll interval must be greater than zero".to_string()));
        }

        if self.timeout <= self.interval {
            return Err(Error::InvalidArgument(format!(
                "poll timeout ({:?}) must be longer than the interval ({:?})",
                self.timeout, self.interval
            )));
        }

        Ok(())
    }
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(defaults::POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(defaults::POLL_TIMEOUT_SECS),
        }
    }
}

impl From<&PollerConfig> for PollerSettings {
    fn from(config: &PollerConfig) -> Self {
        Self {
            interval: config.interval(),
            timeout: config.timeout(),
        }
    }
}
