//! Task poller for asynchronous ML Commons operations
//!
//! Model registration returns a task identifier instead of a model. The
//! [`TaskPoller`] queries the task on a fixed interval until it reaches a
//! terminal state, the deadline passes, or the caller cancels.

mod poller;
mod settings;
mod state;

pub use poller::{task_path, TaskPoller};
pub use settings::PollerSettings;
pub use state::{classify, PollState};

/// Cancellation signal accepted by the poller
pub use tokio_util::sync::CancellationToken;
