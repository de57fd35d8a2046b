//! Logging bootstrap for ML Provisioner
//!
//! Library crates only emit `tracing` events. The binary calls [`init`] once
//! to install a subscriber with the configured filter, format and output.

mod logger;

pub use logger::{build_filter, init, LoggingGuard};
