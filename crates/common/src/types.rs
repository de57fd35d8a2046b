//! Common types for ML Provisioner
//!
//! This module defines identifier types and the closed set of artifact kinds.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote system on successful creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(String);

impl RemoteId {
    /// Creates a new remote identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty identifier means the artifact is not tracked
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the identifier only when it is set and non-empty
    pub fn tracked(id: Option<&RemoteId>) -> Option<&RemoteId> {
        id.filter(|id| !id.is_empty())
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RemoteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RemoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a remote asynchronous task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new task identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Kind of remote ML artifact managed by the provisioner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Model group (synchronous create)
    ModelGroup,
    /// Inference connector (synchronous create)
    Connector,
    /// Registered and deployed model (asynchronous create)
    ModelRegister,
}

impl ArtifactKind {
    /// All supported kinds
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::ModelGroup,
        ArtifactKind::Connector,
        ArtifactKind::ModelRegister,
    ];

    /// Resource type name as exposed to the host tool
    pub fn type_name(&self) -> &'static str {
        match self {
            ArtifactKind::ModelGroup => "model_group",
            ArtifactKind::Connector => "connector",
            ArtifactKind::ModelRegister => "model_register",
        }
    }

    /// Whether creation completes through a remote task
    pub fn is_async(&self) -> bool {
        matches!(self, ArtifactKind::ModelRegister)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "model_group" => Ok(ArtifactKind::ModelGroup),
            "connector" => Ok(ArtifactKind::Connector),
            "model_register" => Ok(ArtifactKind::ModelRegister),
            _ => Err(format!("Unknown artifact kind: {}", s)),
        }
    }
}
