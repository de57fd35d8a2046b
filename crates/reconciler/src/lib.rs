//! Lifecycle reconciliation for ML Commons artifacts
//!
//! The [`Reconciler`] implements create, read, update and delete for any
//! resource adapter, translating remote eventual consistency (404 on read
//! and delete) into non-error outcomes and delegating asynchronous creation
//! to the task poller.

mod reconciler;

pub use reconciler::Reconciler;
