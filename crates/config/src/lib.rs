//! Configuration management for ML Provisioner
//!
//! This crate provides the provider-wide configuration: the remote address,
//! credentials, transport options, polling limits and logging settings.
//! Values are layered from defaults, an optional file and the environment.

pub mod defaults;
pub mod manager;
pub mod settings;
pub mod validation;

// Re-export commonly used types
pub use manager::ConfigManager;
pub use settings::{LogFormat, LoggingConfig, PollerConfig, ProviderConfig};
pub use validation::ConfigValidator;
