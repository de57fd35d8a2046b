//! Model registration adapter
//!
//! Registration is asynchronous: the create call returns a task identifier
//! and the model identifier only becomes known once the task completes.

use serde::Deserialize;

use common::error::Result;
use common::types::{ArtifactKind, RemoteId, TaskId};
use remote_client::RemoteRequest;

use crate::adapter::{decode_response, json_object_payload, required_field, CreateOutcome, ResourceAdapter};
use crate::paths;

/// Declared model registration: an opaque JSON payload sent verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegisterSpec {
    /// Model registration payload
    pub body: String,
}

impl ModelRegisterSpec {
    /// Creates a model registration declaration from its JSON payload
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[derive(Debug, Deserialize)]
struct ModelRegisterResponse {
    #[serde(default)]
    task_id: Option<String>,
}

/// Adapter for `/_plugins/_ml/models`
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelRegisterAdapter;

impl ResourceAdapter for ModelRegisterAdapter {
    type Desired = ModelRegisterSpec;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ModelRegister
    }

    fn build_create_request(&self, desired: &ModelRegisterSpec) -> Result<RemoteRequest> {
        let body = json_object_payload(&desired.body, "model registration")?;
        Ok(RemoteRequest::post(paths::MODEL_REGISTER, body))
    }

    fn parse_create_response(&self, body: &[u8]) -> Result<CreateOutcome> {
        let what = "model register response";
        let response: ModelRegisterResponse = decode_response(body, what)?;
        let task_id = required_field(response.task_id, "task_id", what, body)?;
        Ok(CreateOutcome::Pending(TaskId::new(task_id)))
    }

    fn read_path(&self, id: &RemoteId) -> Result<String> {
        paths::artifact_path(paths::MODELS, id)
    }

    fn delete_path(&self, id: &RemoteId) -> Result<String> {
        paths::artifact_path(paths::MODELS, id)
    }
}
