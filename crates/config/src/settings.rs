//! Provider settings
//!
//! Typed view of the layered configuration. Durations are expressed in whole
//! seconds on the wire and exposed as `Duration` accessors.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Provider-wide configuration shared read-only by every resource
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base address of the remote API (e.g. `https://localhost:9200`)
    pub address: String,

    /// Basic auth username
    #[serde(default)]
    pub username: Option<String>,

    /// Basic auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,

    /// Request SigV4 signing (not supported by this transport)
    #[serde(default)]
    pub use_sig_v4: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Task polling settings
    #[serde(default)]
    pub poller: PollerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProviderConfig {
    /// Creates a configuration for the given address with default settings
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            username: None,
            password: None,
            insecure: false,
            use_sig_v4: false,
            request_timeout: defaults::REQUEST_TIMEOUT_SECS,
            poller: PollerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Sets basic auth credentials
    pub fn with_basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Per-request timeout of the HTTP transport
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("insecure", &self.insecure)
            .field("use_sig_v4", &self.use_sig_v4)
            .field("request_timeout", &self.request_timeout)
            .field("poller", &self.poller)
            .field("logging", &self.logging)
            .finish()
    }
}

fn default_request_timeout() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

/// Task polling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Seconds between polls
    pub interval: u64,
    /// Seconds before giving up
    pub timeout: u64,
}

impl PollerConfig {
    /// Interval between polls
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    /// Total wait bound
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: defaults::POLL_INTERVAL_SECS,
            timeout: defaults::POLL_TIMEOUT_SECS,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level directive used when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional log file; stderr when unset
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}
