//! Remote client for the ML Commons REST API
//!
//! This crate provides the request/response shapes exchanged with the remote
//! control plane, the [`RemoteClient`] seam the reconciler is written against,
//! and [`HttpRemoteClient`], the reqwest-based transport.

mod client;
mod http;
mod request;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::RemoteClient;
pub use http::HttpRemoteClient;
pub use request::{Method, RemoteRequest, RemoteResponse, APPLICATION_JSON};
