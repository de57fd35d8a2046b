//! Scripted in-memory client for tests
//!
//! Responses are registered per method and path and replayed in order. The
//! last response registered for a route repeats once the queue is drained,
//! which models a remote that keeps reporting the same state. Every request
//! is recorded so tests can assert what was (or was not) sent.

use std::collections::{HashMap, VecDeque};
use async_trait::async_trait;
use parking_lot::Mutex;

use common::error::{Error, Result};

use crate::client::RemoteClient;
use crate::request::{Method, RemoteRequest, RemoteResponse};

#[derive(Debug, Clone)]
enum Scripted {
    Response(RemoteResponse),
    TransportError(String),
}

/// In-memory [`RemoteClient`] replaying canned responses
#[derive(Default)]
pub struct ScriptedClient {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<RemoteRequest>>,
}

impl ScriptedClient {
    /// Creates a client with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for `method path`
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(method, path, Scripted::Response(RemoteResponse::new(status, body)));
        self
    }

    /// Queues a transport failure for `method path`
    pub fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
        self.push(method, path, Scripted::TransportError(message.to_string()));
        self
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<RemoteRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of requests received for `method path`
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.method == method && request.path == path)
            .count()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }
}

#[async_trait]
impl RemoteClient for ScriptedClient {
    async fn perform(&self, request: RemoteRequest) -> Result<RemoteResponse> {
        let key = (request.method, request.path.clone());
        self.requests.lock().push(request);

        let scripted = {
            let mut routes = self.routes.lock();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match scripted {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::TransportError(message)) => Err(Error::Transport(message)),
            None => Err(Error::Transport(format!("no scripted response for {} {}", key.0, key.1))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_repeats_last() {
        let client = ScriptedClient::new();
        client
            .respond(Method::Get, "/t", 200, "first")
            .respond(Method::Get, "/t", 200, "second");

        let bodies = [
            client.perform(RemoteRequest::get("/t")).await.unwrap().body_text(),
            client.perform(RemoteRequest::get("/t")).await.unwrap().body_text(),
            client.perform(RemoteRequest::get("/t")).await.unwrap().body_text(),
        ];

        assert_eq!(bodies, ["first", "second", "second"]);
        assert_eq!(client.count(Method::Get, "/t"), 3);
    }

    #[tokio::test]
    async fn test_unscripted_route_is_a_transport_error() {
        let client = ScriptedClient::new();
        let err = client.perform(RemoteRequest::delete("/x")).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(client.request_count(), 1);
    }
}
