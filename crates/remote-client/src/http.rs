//! reqwest-based transport
//!
//! This module provides the production [`RemoteClient`], configured once from
//! the provider configuration and shared by every reconciler.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{trace, warn};

use common::error::{Error, Result};
use provider_config::ProviderConfig;

use crate::client::RemoteClient;
use crate::request::{Method, RemoteRequest, RemoteResponse};

/// HTTP client bound to one remote base address
pub struct HttpRemoteClient {
    /// HTTP client
    client: Client,

    /// Base address without trailing slash
    base_url: String,

    /// Basic auth credentials
    credentials: Option<(String, Option<String>)>,
}

impl HttpRemoteClient {
    /// Creates a client from the provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        if config.insecure {
            warn!(address = %config.address, "TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .user_agent(concat!("ml-provisioner/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|e| Error::Config(format!("Could not create HTTP client: {}", e)))?;

        let credentials = config
            .username
            .clone()
            .map(|username| (username, config.password.clone()));

        Ok(Self {
            client,
            base_url: config.address.trim().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Absolute URL for a request path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn perform(&self, request: RemoteRequest) -> Result<RemoteResponse> {
        let url = self.url_for(&request.path);

        let mut builder = self.client.request(Self::method(request.method), &url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some((username, password)) = &self.credentials {
            builder = builder.basic_auth(username, password.as_ref());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        trace!(method = %request.method, path = %request.path, "Sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{} {}: {}", request.method, request.path, e)))?;

        let status = response.status().as_u16();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("Reading response of {} {}: {}", request.method, request.path, e)))?
            .to_vec();

        trace!(method = %request.method, path = %request.path, status, "Received response");

        Ok(RemoteResponse { status, headers, body })
    }
}
