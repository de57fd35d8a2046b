//! Configuration validation

use common::error::{Error, Result};

use crate::settings::ProviderConfig;

/// Validates a loaded provider configuration
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks the configuration for values the transport cannot work with
    pub fn validate(config: &ProviderConfig) -> Result<()> {
        let address = config.address.trim();

        if address.is_empty() {
            return Err(Error::Config("address must not be empty".to_string()));
        }

        if !(address.starts_with("http://") || address.starts_with("https://")) {
            return Err(Error::Config(format!(
                "address must start with http:// or https://, got {}",
                address
            )));
        }

        if config.use_sig_v4 {
            return Err(Error::Config(
                "use_sig_v4 is not supported; configure basic auth or an unauthenticated endpoint".to_string(),
            ));
        }

        if config.password.is_some() && config.username.is_none() {
            return Err(Error::Config("password is set but username is missing".to_string()));
        }

        if config.request_timeout == 0 {
            return Err(Error::Config("request_timeout must be greater than zero".to_string()));
        }

        if config.poller.interval == 0 {
            return Err(Error::Config("poller.interval must be greater than zero".to_string()));
        }

        if config.poller.timeout <= config.poller.interval {
            return Err(Error::Config(format!(
                "poller.timeout ({}s) must be longer than poller.interval ({}s)",
                config.poller.timeout, config.poller.interval
            )));
        }

        Ok(())
    }
}
