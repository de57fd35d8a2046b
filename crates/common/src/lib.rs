//! Common utilities and types for ML Provisioner
//! 
//! This crate provides shared functionality used across the provisioner,
//! including the error taxonomy, remote identifiers and the task model.

pub mod error;
pub mod models;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{Error, Result};
pub use models::*;
pub use types::*;
