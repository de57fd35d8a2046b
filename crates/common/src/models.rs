//! Common data models for ML Provisioner
//!
//! This module defines the remote task model and the outcomes of the
//! read and delete lifecycle operations.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::types::RemoteId;

/// Task state string for a successfully completed task
pub const TASK_STATE_COMPLETED: &str = "COMPLETED";

/// Task state string for a failed task
pub const TASK_STATE_FAILED: &str = "FAILED";

/// State of a remote asynchronous task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    /// Task accepted but not yet scheduled
    Created,
    /// Task waiting for resources
    Pending,
    /// Task executing
    Running,
    /// Task finished successfully
    Completed,
    /// Task finished with an error
    Failed,
    /// Any other state reported by the remote system
    Other(String),
}

impl TaskState {
    /// Wire representation of the state
    pub fn as_str(&self) -> &str {
        match self {
            TaskState::Created => "CREATED",
            TaskState::Pending => "PENDING",
            TaskState::Running => "RUNNING",
            TaskState::Completed => TASK_STATE_COMPLETED,
            TaskState::Failed => TASK_STATE_FAILED,
            TaskState::Other(state) => state,
        }
    }
}

impl From<String> for TaskState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "CREATED" => TaskState::Created,
            "PENDING" => TaskState::Pending,
            "RUNNING" => TaskState::Running,
            TASK_STATE_COMPLETED => TaskState::Completed,
            TASK_STATE_FAILED => TaskState::Failed,
            _ => TaskState::Other(state),
        }
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET /_plugins/_ml/tasks/{task_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Task ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    /// Task state; absent only when the remote breaks its contract
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<TaskState>,
    /// Identifier produced by the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Free-form task response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TaskStatus {
    /// Returns the produced identifier when present and non-empty
    pub fn produced_id(&self) -> Option<RemoteId> {
        self.model_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .map(RemoteId::new)
    }
}

/// A remote artifact confirmed to exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteArtifact {
    /// Identifier the artifact was read by
    pub id: RemoteId,
    /// Raw body returned by the read call
    pub body: String,
}

/// Outcome of reading a remote artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The artifact exists
    Present(RemoteArtifact),
    /// The artifact does not exist or was never tracked
    Absent,
}

impl ReadOutcome {
    /// Returns true if the artifact exists
    pub fn is_present(&self) -> bool {
        matches!(self, ReadOutcome::Present(_))
    }
}

/// Outcome of deleting a remote artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The remote system deleted the artifact
    Deleted,
    /// The remote system reported 404
    AlreadyGone,
    /// No identifier was held, nothing was sent
    NotTracked,
}
