//! Resource adapters for ML Commons artifacts
//!
//! Each adapter is a pure, side-effect-free translation between the declared
//! desired state of one artifact kind and the REST shapes of the remote API:
//! the create request, the identifier in the create response, and the read
//! and delete paths.

mod adapter;
mod connector;
mod model_group;
mod model_register;
pub mod paths;

pub use adapter::{CreateOutcome, ResourceAdapter};
pub use connector::{ConnectorAdapter, ConnectorSpec};
pub use model_group::{ModelGroupAdapter, ModelGroupSpec};
pub use model_register::{ModelRegisterAdapter, ModelRegisterSpec};
