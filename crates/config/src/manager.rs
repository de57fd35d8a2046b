//! Configuration loading
//!
//! Sources are layered lowest to highest precedence: serde defaults, the
//! config file, then `ML_PROVISIONER_*` environment variables.

use std::collections::HashMap;
use std::path::PathBuf;
use config::{Config, Environment, File};
use tracing::debug;

use common::error::{Error, Result};

use crate::defaults;
use crate::settings::ProviderConfig;
use crate::validation::ConfigValidator;

/// Loads and validates the provider configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    /// Explicit config file; must exist when set
    file: Option<PathBuf>,

    /// Environment snapshot used instead of the process environment
    env_source: Option<HashMap<String, String>>,
}

impl ConfigManager {
    /// Creates a manager reading the default config file location
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the given file instead of the default location
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Reads overrides from the given map instead of the process environment
    pub fn with_env_source(mut self, env: HashMap<String, String>) -> Self {
        self.env_source = Some(env);
        self
    }

    /// Default config file location, `<config_dir>/ml-provisioner/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR).join(defaults::CONFIG_FILE))
    }

    /// Loads, deserializes and validates the configuration
    pub fn load(&self) -> Result<ProviderConfig> {
        let mut builder = Config::builder();

        match &self.file {
            Some(path) => {
                debug!(path = %path.display(), "Loading provider configuration file");
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                if let Some(path) = Self::default_path() {
                    debug!(path = %path.display(), "Looking for default provider configuration file");
                    builder = builder.add_source(File::from(path.as_path()).required(false));
                }
            }
        }

        let mut env = Environment::with_prefix(defaults::ENV_PREFIX)
            .prefix_separator("_")
            .separator(defaults::ENV_SEPARATOR);

        if let Some(source) = &self.env_source {
            env = env.source(Some(source.clone()));
        }

        let config = builder
            .add_source(env)
            .build()
            .map_err(|e| Error::Config(format!("Failed to load configuration: {}", e)))?;

        let provider: ProviderConfig = config
            .try_deserialize()
            .map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))?;

        ConfigValidator::validate(&provider)?;

        debug!(address = %provider.address, "Provider configuration loaded");

        Ok(provider)
    }
}
