//! Classification of one task status observation

use common::error::{Error, Result};
use common::models::{TaskState, TaskStatus};
use common::types::RemoteId;

/// What a single poll tells us about the task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// Still in progress, in the given state
    Waiting(TaskState),
    /// Completed and produced this identifier
    Done(RemoteId),
    /// Terminal failure with remote-supplied detail
    Failed(String),
}

/// Classifies a 2xx task status body.
///
/// A missing `state` is a contract break. COMPLETED without an identifier is
/// a failure, not a reason to keep polling.
pub fn classify(body: &[u8]) -> Result<PollState> {
    let status: TaskStatus = serde_json::from_slice(body).map_err(|e| {
        Error::MalformedResponse(format!(
            "task status is not valid JSON ({}): {}",
            e,
            String::from_utf8_lossy(body)
        ))
    })?;

    let state = status.state.clone().ok_or_else(|| {
        Error::MalformedResponse(format!(
            "task status has no state: {}",
            String::from_utf8_lossy(body)
        ))
    })?;

    Ok(match state {
        TaskState::Completed => match status.produced_id() {
            Some(id) => PollState::Done(id),
            None => PollState::Failed("task completed without producing an identifier".to_string()),
        },
        TaskState::Failed => PollState::Failed(String::from_utf8_lossy(body).into_owned()),
        other => PollState::Waiting(other),
    })
}
