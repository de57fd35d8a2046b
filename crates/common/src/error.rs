//! Error types for the common crate
//!
//! This module defines the error taxonomy shared by every provisioning
//! operation. Variants are split so that a caller can tell "definitely
//! failed", "definitely absent" and "unknown outcome" apart.

use std::time::Duration;
use thiserror::Error;

use crate::utils::format_duration;

/// Result type for provisioning operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for provisioning operations
#[derive(Error, Debug)]
pub enum Error {
    /// The remote client could not complete the request
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-2xx response from the remote API
    #[error("Remote API returned {status}: {body}")]
    RemoteRejected {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// 2xx response missing an expected field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Remote task reached the FAILED state
    #[error("Task {task_id} failed: {detail}")]
    TaskFailed {
        /// Task identifier
        task_id: String,
        /// Remote-supplied detail
        detail: String,
    },

    /// Gave up waiting for a remote task
    #[error("Timed out after {} waiting for task {}", format_duration(*.elapsed), .task_id)]
    TaskTimedOut {
        /// Time spent waiting
        elapsed: Duration,
        /// Task identifier
        task_id: String,
    },

    /// Caller cancelled while waiting for a remote task
    #[error("Cancelled while waiting for task {task_id}")]
    TaskCancelled {
        /// Task identifier
        task_id: String,
    },

    /// Invalid argument error
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Builds a `RemoteRejected` error from a status and raw body
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Error::RemoteRejected {
            status,
            body: body.into(),
        }
    }

    /// Returns true if the remote API rejected the request
    pub fn is_remote_rejected(&self) -> bool {
        matches!(self, Error::RemoteRejected { .. })
    }

    /// Returns the HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if a 2xx response broke the API contract
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedResponse(_))
    }

    /// Returns true if a remote task reported failure
    pub fn is_task_failed(&self) -> bool {
        matches!(self, Error::TaskFailed { .. })
    }

    /// Returns true if the error is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::TaskTimedOut { .. })
    }

    /// Returns true if the error is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::TaskCancelled { .. })
    }

    /// Returns true when the remote effect of the call is unknown.
    ///
    /// The remote side may have completed (or may still complete) the
    /// operation, so the caller must not assume it failed.
    pub fn is_unknown_outcome(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::TaskTimedOut { .. } | Error::TaskCancelled { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let rejected = Error::rejected(500, "boom");
        assert!(rejected.is_remote_rejected());
        assert_eq!(rejected.status(), Some(500));
        assert!(!rejected.is_unknown_outcome());

        let timed_out = Error::TaskTimedOut {
            elapsed: Duration::from_secs(900),
            task_id: "t1".to_string(),
        };
        assert!(timed_out.is_timeout());
        assert!(timed_out.is_unknown_outcome());
        assert_eq!(timed_out.status(), None);

        let cancelled = Error::TaskCancelled { task_id: "t1".to_string() };
        assert!(cancelled.is_cancelled());
        assert!(cancelled.is_unknown_outcome());

        let failed = Error::TaskFailed {
            task_id: "t1".to_string(),
            detail: "{}".to_string(),
        };
        assert!(failed.is_task_failed());
        assert!(!failed.is_unknown_outcome());
    }

    #[test]
    fn test_messages_carry_context() {
        let timed_out = Error::TaskTimedOut {
            elapsed: Duration::from_secs(905),
            task_id: "abc".to_string(),
        };
        assert_eq!(timed_out.to_string(), "Timed out after 15m 5s waiting for task abc");

        let rejected = Error::rejected(404, "{\"error\":\"missing\"}");
        assert_eq!(rejected.to_string(), "Remote API returned 404: {\"error\":\"missing\"}");
    }
}
