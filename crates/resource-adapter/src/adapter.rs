//! Adapter trait shared by all artifact kinds

use serde::de::DeserializeOwned;

use common::error::{Error, Result};
use common::types::{ArtifactKind, RemoteId, TaskId};
use remote_client::RemoteRequest;

/// Result of parsing a successful create response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The artifact exists and has this identifier
    Ready(RemoteId),
    /// Creation continues remotely as this task
    Pending(TaskId),
}

/// Translation between a desired state and the remote API for one kind.
///
/// Implementations are pure: identical input yields identical requests and
/// nothing is sent from here.
pub trait ResourceAdapter: Send + Sync {
    /// Declared state of this artifact kind
    type Desired: Send + Sync;

    /// Artifact kind handled by this adapter
    fn kind(&self) -> ArtifactKind;

    /// Builds the create request for a desired state
    fn build_create_request(&self, desired: &Self::Desired) -> Result<RemoteRequest>;

    /// Extracts the identifier (or task) from a 2xx create response body
    fn parse_create_response(&self, body: &[u8]) -> Result<CreateOutcome>;

    /// Path of the artifact for reads
    fn read_path(&self, id: &RemoteId) -> Result<String>;

    /// Path of the artifact for deletes
    fn delete_path(&self, id: &RemoteId) -> Result<String>;
}

/// Decodes a JSON response body, reporting failures as contract breaks
pub(crate) fn decode_response<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        Error::MalformedResponse(format!(
            "{} is not valid JSON ({}): {}",
            what,
            e,
            String::from_utf8_lossy(body)
        ))
    })
}

/// Returns the field value when present and non-empty
pub(crate) fn required_field(value: Option<String>, field: &str, what: &str, body: &[u8]) -> Result<String> {
    value.filter(|value| !value.trim().is_empty()).ok_or_else(|| {
        Error::MalformedResponse(format!(
            "{} has no {}: {}",
            what,
            field,
            String::from_utf8_lossy(body)
        ))
    })
}

/// Checks that an opaque payload is a JSON object and returns its bytes unchanged
pub(crate) fn json_object_payload(body: &str, what: &str) -> Result<Vec<u8>> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::InvalidArgument(format!("{} body is not valid JSON: {}", what, e)))?;

    if !value.is_object() {
        return Err(Error::InvalidArgument(format!("{} body must be a JSON object", what)));
    }

    Ok(body.as_bytes().to_vec())
}
