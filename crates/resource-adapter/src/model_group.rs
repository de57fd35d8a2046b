//! Model group adapter

use serde::{Deserialize, Serialize};

use common::error::Result;
use common::types::{ArtifactKind, RemoteId};
use remote_client::RemoteRequest;

use crate::adapter::{decode_response, required_field, CreateOutcome, ResourceAdapter};
use crate::paths;

/// Declared model group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelGroupSpec {
    /// Human-readable model group name
    pub name: String,

    /// Description of the model group
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ModelGroupSpec {
    /// Creates a model group declaration
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelGroupCreateResponse {
    #[serde(default)]
    model_group_id: Option<String>,
}

/// Adapter for `/_plugins/_ml/model_groups`
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelGroupAdapter;

impl ResourceAdapter for ModelGroupAdapter {
    type Desired = ModelGroupSpec;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::ModelGroup
    }

    fn build_create_request(&self, desired: &ModelGroupSpec) -> Result<RemoteRequest> {
        let body = serde_json::to_vec(desired)?;
        Ok(RemoteRequest::post(paths::MODEL_GROUP_REGISTER, body))
    }

    fn parse_create_response(&self, body: &[u8]) -> Result<CreateOutcome> {
        let what = "model group create response";
        let response: ModelGroupCreateResponse = decode_response(body, what)?;
        let id = required_field(response.model_group_id, "model_group_id", what, body)?;
        Ok(CreateOutcome::Ready(RemoteId::new(id)))
    }

    fn read_path(&self, id: &RemoteId) -> Result<String> {
        paths::artifact_path(paths::MODEL_GROUPS, id)
    }

    fn delete_path(&self, id: &RemoteId) -> Result<String> {
        paths::artifact_path(paths::MODEL_GROUPS, id)
    }
}
