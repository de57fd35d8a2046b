//! Main integration module for ML Provisioner
//!
//! This module wires the configured remote client into one reconciler per
//! artifact kind. One client is constructed per provider and shared
//! read-only by every reconciler.

use std::sync::Arc;
use anyhow::{Context, Result};
use tracing::info;

use provider_config::ProviderConfig;
use reconciler::Reconciler;
use remote_client::{HttpRemoteClient, RemoteClient};
use resource_adapter::{ConnectorAdapter, ModelGroupAdapter, ModelRegisterAdapter};
use task_poller::PollerSettings;

pub use common::error::Error;
pub use common::models::{DeleteOutcome, ReadOutcome, RemoteArtifact};
pub use common::types::{ArtifactKind, RemoteId, TaskId};
pub use resource_adapter::{ConnectorSpec, ModelGroupSpec, ModelRegisterSpec};
pub use task_poller::CancellationToken;

/// Reconciler for model groups
pub type ModelGroupReconciler<C> = Reconciler<ModelGroupAdapter, C>;

/// Reconciler for connectors
pub type ConnectorReconciler<C> = Reconciler<ConnectorAdapter, C>;

/// Reconciler for model registrations
pub type ModelRegisterReconciler<C> = Reconciler<ModelRegisterAdapter, C>;

/// Configured provider handing out reconcilers that share one client
pub struct Provider<C = HttpRemoteClient> {
    /// Shared remote client
    client: Arc<C>,

    /// Poller settings for asynchronous creation
    poller: PollerSettings,
}

impl Provider<HttpRemoteClient> {
    /// Creates a provider talking HTTP to the configured address
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = HttpRemoteClient::new(config)
            .with_context(|| format!("Could not create client for {}", config.address))?;

        info!(
            address = %config.address,
            authenticated = config.username.is_some(),
            "Provider configured"
        );

        Ok(Self::with_client(Arc::new(client), PollerSettings::from(&config.poller)))
    }
}

impl<C: RemoteClient> Provider<C> {
    /// Creates a provider around an existing client
    pub fn with_client(client: Arc<C>, poller: PollerSettings) -> Self {
        Self { client, poller }
    }

    /// Reconciler for `model_group` resources
    pub fn model_groups(&self) -> ModelGroupReconciler<C> {
        Reconciler::new(ModelGroupAdapter, self.client.clone(), self.poller)
    }

    /// Reconciler for `connector` resources
    pub fn connectors(&self) -> ConnectorReconciler<C> {
        Reconciler::new(ConnectorAdapter, self.client.clone(), self.poller)
    }

    /// Reconciler for `model_register` resources
    pub fn model_registrations(&self) -> ModelRegisterReconciler<C> {
        Reconciler::new(ModelRegisterAdapter, self.client.clone(), self.poller)
    }
}
