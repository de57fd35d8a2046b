//! Reconciler implementation
//!
//! Every operation runs sequentially on the caller's task and holds no state
//! between calls. The remote identifier is handed in and out as a plain
//! value; persisting it is the caller's job.

use std::sync::Arc;
use tracing::{debug, info, trace, warn};

use common::error::{Error, Result};
use common::models::{DeleteOutcome, ReadOutcome, RemoteArtifact};
use common::types::RemoteId;
use common::utils::truncate_for_log;
use remote_client::{RemoteClient, RemoteRequest, RemoteResponse};
use resource_adapter::{CreateOutcome, ResourceAdapter};
use task_poller::{CancellationToken, PollerSettings, TaskPoller};

/// Lifecycle operations for one artifact kind
pub struct Reconciler<A, C> {
    /// Wire translation for the artifact kind
    adapter: A,

    /// Shared remote client
    client: Arc<C>,

    /// Waits on asynchronous creation
    poller: TaskPoller<C>,
}

impl<A, C> Reconciler<A, C>
where
    A: ResourceAdapter,
    C: RemoteClient,
{
    /// Creates a reconciler sharing the given client
    pub fn new(adapter: A, client: Arc<C>, settings: PollerSettings) -> Self {
        let poller = TaskPoller::new(client.clone(), settings);

        Self {
            adapter,
            client,
            poller,
        }
    }

    /// Adapter used by this reconciler
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Creates the remote artifact and returns its identifier.
    ///
    /// Not idempotent: each successful call creates one remote artifact.
    /// `cancel` is only observed while waiting on an asynchronous task.
    pub async fn create(&self, desired: &A::Desired, cancel: &CancellationToken) -> Result<RemoteId> {
        let kind = self.adapter.kind();
        let request = self.adapter.build_create_request(desired)?;

        debug!(kind = %kind, path = %request.path, "Creating artifact");

        let response = self.send(request).await?;

        if !response.is_success() {
            warn!(
                kind = %kind,
                status = response.status,
                body = %truncate_for_log(&response.body_text(), 512),
                "Create rejected"
            );
            return Err(Error::rejected(response.status, response.body_text()));
        }

        let id = match self.adapter.parse_create_response(&response.body)? {
            CreateOutcome::Ready(id) => id,
            CreateOutcome::Pending(task_id) => {
                debug!(kind = %kind, task_id = %task_id, "Create continues as remote task");
                self.poller.wait_for_completion(&task_id, cancel).await?
            }
        };

        info!(kind = %kind, id = %id, "Created artifact");

        Ok(id)
    }

    /// Confirms whether the artifact still exists.
    ///
    /// An untracked identifier reports `Absent` without a request. The body
    /// is kept raw; declared fields are never reconstructed from it.
    pub async fn read(&self, id: Option<&RemoteId>) -> Result<ReadOutcome> {
        let kind = self.adapter.kind();

        let Some(id) = RemoteId::tracked(id) else {
            trace!(kind = %kind, "No identifier to read");
            return Ok(ReadOutcome::Absent);
        };

        let path = self.adapter.read_path(id)?;
        let response = self.send(RemoteRequest::get(path)).await?;

        if response.is_not_found() {
            info!(kind = %kind, id = %id, "Artifact no longer exists");
            return Ok(ReadOutcome::Absent);
        }

        if !response.is_success() {
            return Err(Error::rejected(response.status, response.body_text()));
        }

        trace!(kind = %kind, id = %id, "Artifact present");

        Ok(ReadOutcome::Present(RemoteArtifact {
            id: id.clone(),
            body: response.body_text(),
        }))
    }

    /// Re-affirms the stored identifier; sends nothing.
    ///
    /// Every declared field is replace-only and the remote API has no patch
    /// endpoint, so a changed declaration is handled by delete and create.
    pub fn update(&self, current: Option<&RemoteId>, _desired: &A::Desired) -> Option<RemoteId> {
        let current = RemoteId::tracked(current).cloned();

        trace!(
            kind = %self.adapter.kind(),
            id = current.as_ref().map(RemoteId::as_str).unwrap_or_default(),
            "Update is a no-op"
        );

        current
    }

    /// Deletes the artifact. Safe to repeat: 404 counts as success.
    ///
    /// On error the caller must keep the identifier.
    pub async fn delete(&self, id: Option<&RemoteId>) -> Result<DeleteOutcome> {
        let kind = self.adapter.kind();

        let Some(id) = RemoteId::tracked(id) else {
            trace!(kind = %kind, "No identifier to delete");
            return Ok(DeleteOutcome::NotTracked);
        };

        let path = self.adapter.delete_path(id)?;
        let response = self.send(RemoteRequest::delete(path)).await?;

        if response.is_not_found() {
            info!(kind = %kind, id = %id, "Artifact already deleted");
            return Ok(DeleteOutcome::AlreadyGone);
        }

        if !response.is_success() {
            warn!(kind = %kind, id = %id, status = response.status, "Delete rejected");
            return Err(Error::rejected(response.status, response.body_text()));
        }

        info!(kind = %kind, id = %id, "Deleted artifact");

        Ok(DeleteOutcome::Deleted)
    }

    async fn send(&self, request: RemoteRequest) -> Result<RemoteResponse> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.client.perform(request).await?;

        debug!(
            method = %method,
            path = %path,
            status = response.status,
            content_type = response.header("content-type").unwrap_or_default(),
            "Remote call finished"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use remote_client::testing::ScriptedClient;
    use remote_client::Method;
    use resource_adapter::{
        ConnectorAdapter, ConnectorSpec, ModelGroupAdapter, ModelGroupSpec, ModelRegisterAdapter,
        ModelRegisterSpec,
    };

    const REGISTER: &str = "/_plugins/_ml/models/_register?deploy=true";
    const TASK: &str = "/_plugins/_ml/tasks/t-1";
    const MODEL: &str = "/_plugins/_ml/models/m1";

    fn settings() -> PollerSettings {
        PollerSettings::new(Duration::from_secs(2), Duration::from_secs(60))
    }

    fn model_groups(client: &Arc<ScriptedClient>) -> Reconciler<ModelGroupAdapter, ScriptedClient> {
        Reconciler::new(ModelGroupAdapter, client.clone(), settings())
    }

    fn models(client: &Arc<ScriptedClient>) -> Reconciler<ModelRegisterAdapter, ScriptedClient> {
        Reconciler::new(ModelRegisterAdapter, client.clone(), settings())
    }

    #[tokio::test]
    async fn test_create_sync_returns_identifier() {
        let client = Arc::new(ScriptedClient::new());
        client.respond(
            Method::Post,
            "/_plugins/_ml/model_groups/_register",
            200,
            r#"{"model_group_id":"g1","status":"CREATED"}"#,
        );

        let id = model_groups(&client)
            .create(&ModelGroupSpec::new("g", "d"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(id, RemoteId::new("g1"));
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_create_rejected_keeps_status_and_body() {
        let client = Arc::new(ScriptedClient::new());
        client.respond(Method::Post, "/_plugins/_ml/connectors/_create", 400, "bad connector");

        let reconciler = Reconciler::new(ConnectorAdapter, client.clone(), settings());
        let err = reconciler
            .create(&ConnectorSpec::new("{}"), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            Error::RemoteRejected { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "bad connector");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_without_identifier_is_malformed() {
        let client = Arc::new(ScriptedClient::new());
        client.respond(Method::Post, "/_plugins/_ml/model_groups/_register", 200, "{}");

        let err = model_groups(&client)
            .create(&ModelGroupSpec::new("g", "d"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_invalid_payload_sends_nothing() {
        let client = Arc::new(ScriptedClient::new());

        let err = models(&client)
            .create(&ModelRegisterSpec::new("not json"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_async_waits_for_task() {
        let client = Arc::new(ScriptedClient::new());
        client
            .respond(Method::Post, REGISTER, 200, r#"{"task_id":"t-1","status":"CREATED"}"#)
            .respond(Method::Get, TASK, 200, r#"{"state":"RUNNING"}"#)
            .respond(Method::Get, TASK, 200, r#"{"state":"COMPLETED","model_id":"m1"}"#);

        let id = models(&client)
            .create(&ModelRegisterSpec::new(r#"{"name":"m"}"#), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(id, RemoteId::new("m1"));
        assert_eq!(client.count(Method::Get, TASK), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_rejected_never_polls() {
        let client = Arc::new(ScriptedClient::new());
        client.respond(Method::Post, REGISTER, 500, "internal error");

        let err = models(&client)
            .create(&ModelRegisterSpec::new(r#"{"name":"m"}"#), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(client.count(Method::Get, TASK), 0);
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_classification_is_preserved() {
        let client = Arc::new(ScriptedClient::new());
        client
            .respond(Method::Post, REGISTER, 200, r#"{"task_id":"t-1"}"#)
            .respond(Method::Get, TASK, 200, r#"{"state":"FAILED"}"#);

        let err = models(&client)
            .create(&ModelRegisterSpec::new(r#"{"name":"m"}"#), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_task_failed());

        let client = Arc::new(ScriptedClient::new());
        client
            .respond(Method::Post, REGISTER, 200, r#"{"task_id":"t-1"}"#)
            .respond(Method::Get, TASK, 200, r#"{"state":"RUNNING"}"#);

        let err = models(&client)
            .create(&ModelRegisterSpec::new(r#"{"name":"m"}"#), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(err.is_unknown_outcome());
    }

    #[tokio::test]
    async fn test_read_untracked_sends_nothing() {
        let client = Arc::new(ScriptedClient::new());
        let reconciler = models(&client);

        assert_eq!(reconciler.read(None).await.unwrap(), ReadOutcome::Absent);
        assert_eq!(
            reconciler.read(Some(&RemoteId::new(""))).await.unwrap(),
            ReadOutcome::Absent
        );
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_read_outcomes() {
        let client = Arc::new(ScriptedClient::new());
        client
            .respond(Method::Get, MODEL, 200, r#"{"name":"m","model_state":"DEPLOYED"}"#)
            .respond(Method::Get, MODEL, 404, "")
            .respond(Method::Get, MODEL, 403, "forbidden");

        let reconciler = models(&client);
        let id = RemoteId::new("m1");

        match reconciler.read(Some(&id)).await.unwrap() {
            ReadOutcome::Present(artifact) => {
                assert_eq!(artifact.id, id);
                assert!(artifact.body.contains("DEPLOYED"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(reconciler.read(Some(&id)).await.unwrap(), ReadOutcome::Absent);
        assert_eq!(reconciler.read(Some(&id)).await.unwrap_err().status(), Some(403));
    }

    #[tokio::test]
    async fn test_update_sends_nothing() {
        let client = Arc::new(ScriptedClient::new());
        let reconciler = model_groups(&client);
        let id = RemoteId::new("g1");

        assert_eq!(
            reconciler.update(Some(&id), &ModelGroupSpec::new("renamed", "changed")),
            Some(id)
        );
        assert_eq!(reconciler.update(None, &ModelGroupSpec::new("g", "d")), None);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let client = Arc::new(ScriptedClient::new());
        client
            .respond(Method::Delete, MODEL, 200, r#"{"result":"deleted"}"#)
            .respond(Method::Delete, MODEL, 404, r#"{"result":"not_found"}"#);

        let reconciler = models(&client);
        let id = RemoteId::new("m1");

        assert_eq!(reconciler.delete(Some(&id)).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(reconciler.delete(Some(&id)).await.unwrap(), DeleteOutcome::AlreadyGone);
    }

    #[tokio::test]
    async fn test_delete_untracked_and_rejected() {
        let client = Arc::new(ScriptedClient::new());
        client.respond(Method::Delete, MODEL, 409, "model is deployed");

        let reconciler = models(&client);

        assert_eq!(reconciler.delete(None).await.unwrap(), DeleteOutcome::NotTracked);
        assert_eq!(client.request_count(), 0);

        let err = reconciler.delete(Some(&RemoteId::new("m1"))).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
    }
}
