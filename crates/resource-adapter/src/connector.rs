//! Connector adapter

use serde::Deserialize;

use common::error::Result;
use common::types::{ArtifactKind, RemoteId};
use remote_client::RemoteRequest;

use crate::adapter::{decode_response, json_object_payload, required_field, CreateOutcome, ResourceAdapter};
use crate::paths;

/// Declared connector: an opaque JSON configuration sent verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSpec {
    /// Connector configuration payload
    pub body: String,
}

impl ConnectorSpec {
    /// Creates a connector declaration from its JSON payload
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[derive(Debug, Deserialize)]
struct ConnectorCreateResponse {
    #[serde(default)]
    connector_id: Option<String>,
}

/// Adapter for `/_plugins/_ml/connectors`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorAdapter;

impl ResourceAdapter for ConnectorAdapter {
    type Desired = ConnectorSpec;

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Connector
    }

    fn build_create_request(&self, desired: &ConnectorSpec) -> Result<RemoteRequest> {
        let body = json_object_payload(&desired.body, "connector")?;
        Ok(RemoteRequest::post(paths::CONNECTOR_CREATE, body))
    }

    fn parse_create_response(&self, body: &[u8]) -> Result<CreateOutcome> {
        let what = "connector create response";
        let response: ConnectorCreateResponse = decode_response(body, what)?;
        let id = required_field(response.connector_id, "connector_id", what, body)?;
        Ok(CreateOutcome::Ready(RemoteId::new(id)))
    }

    fn read_path(&self, id: &RemoteId) -> Result<String> {
        paths::artifact_path(paths::CONNECTORS, id)
    }

    fn delete_path(&self, id: &RemoteId) -> Result<String> {
        paths::artifact_path(paths::CONNECTORS, id)
    }
}
