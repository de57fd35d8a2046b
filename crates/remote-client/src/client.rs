//! Remote client seam

use std::sync::Arc;
use async_trait::async_trait;

use common::error::Result;

use crate::request::{RemoteRequest, RemoteResponse};

/// Performs authenticated requests against a fixed base address.
///
/// Implementations must be safe for concurrent use; callers add no locking.
/// Only transport failures are errors: every HTTP status, including 4xx and
/// 5xx, is returned as a [`RemoteResponse`].
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Sends the request and returns the status, headers and body
    async fn perform(&self, request: RemoteRequest) -> Result<RemoteResponse>;
}

#[async_trait]
impl<C: RemoteClient + ?Sized> RemoteClient for Arc<C> {
    async fn perform(&self, request: RemoteRequest) -> Result<RemoteResponse> {
        (**self).perform(request).await
    }
}
