//! End-to-end lifecycle tests through the provider facade

use std::sync::Arc;
use std::time::Duration;

use ml_provisioner::{
    CancellationToken, ConnectorSpec, DeleteOutcome, ModelGroupSpec, ModelRegisterSpec, Provider,
    ReadOutcome, RemoteId,
};
use remote_client::testing::ScriptedClient;
use remote_client::Method;
use task_poller::PollerSettings;

fn provider(client: &Arc<ScriptedClient>) -> Provider<ScriptedClient> {
    Provider::with_client(
        client.clone(),
        PollerSettings::new(Duration::from_secs(2), Duration::from_secs(30)),
    )
}

#[tokio::test]
async fn delete_twice_succeeds_for_every_kind() {
    let client = Arc::new(ScriptedClient::new());
    for path in [
        "/_plugins/_ml/model_groups/x1",
        "/_plugins/_ml/connectors/x1",
        "/_plugins/_ml/models/x1",
    ] {
        client
            .respond(Method::Delete, path, 200, r#"{"result":"deleted"}"#)
            .respond(Method::Delete, path, 404, r#"{"result":"not_found"}"#);
    }

    let provider = provider(&client);
    let id = RemoteId::new("x1");

    let groups = provider.model_groups();
    assert_eq!(groups.delete(Some(&id)).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(groups.delete(Some(&id)).await.unwrap(), DeleteOutcome::AlreadyGone);

    let connectors = provider.connectors();
    assert_eq!(connectors.delete(Some(&id)).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(connectors.delete(Some(&id)).await.unwrap(), DeleteOutcome::AlreadyGone);

    let models = provider.model_registrations();
    assert_eq!(models.delete(Some(&id)).await.unwrap(), DeleteOutcome::Deleted);
    assert_eq!(models.delete(Some(&id)).await.unwrap(), DeleteOutcome::AlreadyGone);
}

#[tokio::test]
async fn reading_an_empty_identifier_never_touches_the_network() {
    let client = Arc::new(ScriptedClient::new());
    let provider = provider(&client);
    let empty = RemoteId::new("");

    assert_eq!(provider.model_groups().read(Some(&empty)).await.unwrap(), ReadOutcome::Absent);
    assert_eq!(provider.connectors().read(None).await.unwrap(), ReadOutcome::Absent);
    assert_eq!(provider.model_registrations().read(Some(&empty)).await.unwrap(), ReadOutcome::Absent);

    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn created_connector_reads_back_as_present() {
    let client = Arc::new(ScriptedClient::new());
    client
        .respond(Method::Post, "/_plugins/_ml/connectors/_create", 200, r#"{"connector_id":"c1"}"#)
        .respond(Method::Get, "/_plugins/_ml/connectors/c1", 200, r#"{"name":"bedrock"}"#);

    let connectors = provider(&client).connectors();
    let id = connectors
        .create(&ConnectorSpec::new(r#"{"name":"bedrock"}"#), &CancellationToken::new())
        .await
        .unwrap();

    assert!(connectors.read(Some(&id)).await.unwrap().is_present());
}

#[tokio::test]
async fn create_is_not_idempotent() {
    let client = Arc::new(ScriptedClient::new());
    client
        .respond(Method::Post, "/_plugins/_ml/model_groups/_register", 200, r#"{"model_group_id":"g1"}"#)
        .respond(Method::Post, "/_plugins/_ml/model_groups/_register", 200, r#"{"model_group_id":"g2"}"#);

    let groups = provider(&client).model_groups();
    let spec = ModelGroupSpec::new("embeddings", "shared");
    let cancel = CancellationToken::new();

    let first = groups.create(&spec, &cancel).await.unwrap();
    let second = groups.create(&spec, &cancel).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(client.count(Method::Post, "/_plugins/_ml/model_groups/_register"), 2);
}

#[tokio::test(start_paused = true)]
async fn registered_model_is_tracked_once_its_task_completes() {
    let client = Arc::new(ScriptedClient::new());
    client
        .respond(Method::Post, "/_plugins/_ml/models/_register?deploy=true", 200, r#"{"task_id":"t9","status":"CREATED"}"#)
        .respond(Method::Get, "/_plugins/_ml/tasks/t9", 200, r#"{"state":"CREATED"}"#)
        .respond(Method::Get, "/_plugins/_ml/tasks/t9", 200, r#"{"state":"RUNNING"}"#)
        .respond(Method::Get, "/_plugins/_ml/tasks/t9", 200, r#"{"state":"COMPLETED","model_id":"m9"}"#)
        .respond(Method::Get, "/_plugins/_ml/models/m9", 200, r#"{"model_state":"DEPLOYED"}"#);

    let models = provider(&client).model_registrations();
    let id = models
        .create(&ModelRegisterSpec::new(r#"{"name":"remote"}"#), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(id, RemoteId::new("m9"));
    assert_eq!(client.count(Method::Get, "/_plugins/_ml/tasks/t9"), 3);
    assert!(models.read(Some(&id)).await.unwrap().is_present());
}

#[tokio::test(start_paused = true)]
async fn cancelled_registration_reports_unknown_outcome() {
    let client = Arc::new(ScriptedClient::new());
    client
        .respond(Method::Post, "/_plugins/_ml/models/_register?deploy=true", 200, r#"{"task_id":"t9"}"#)
        .respond(Method::Get, "/_plugins/_ml/tasks/t9", 200, r#"{"state":"RUNNING"}"#);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        trigger.cancel();
    });

    let err = provider(&client)
        .model_registrations()
        .create(&ModelRegisterSpec::new(r#"{"name":"remote"}"#), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(err.is_unknown_outcome());
    assert_eq!(client.count(Method::Get, "/_plugins/_ml/tasks/t9"), 2);
}
