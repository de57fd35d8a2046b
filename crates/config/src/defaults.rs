//! Default configuration values

/// Seconds between two task status polls
pub const POLL_INTERVAL_SECS: u64 = 2;

/// Seconds before a task wait gives up
pub const POLL_TIMEOUT_SECS: u64 = 15 * 60;

/// Per-request timeout of the HTTP transport in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default log level when `RUST_LOG` is unset
pub const LOG_LEVEL: &str = "info";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "ML_PROVISIONER";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Application directory under the user's config dir
pub const APP_DIR: &str = "ml-provisioner";

/// Config file name looked up in the application directory
pub const CONFIG_FILE: &str = "config.toml";
