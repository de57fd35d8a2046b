//! Task completion wait loop
//!
//! The wait is a biased select over cancellation, deadline and the poll tick,
//! so cancellation and deadline are observed with tick granularity. A status
//! request in flight is always allowed to finish.

use std::sync::Arc;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use common::error::{Error, Result};
use common::types::{RemoteId, TaskId};
use common::utils::{path_segment, truncate_for_log};
use remote_client::{RemoteClient, RemoteRequest};

use crate::settings::PollerSettings;
use crate::state::{classify, PollState};

/// Task collection of the ML Commons plugin
const TASKS: &str = "/_plugins/_ml/tasks";

/// Status path of a remote task; the id is percent-encoded
pub fn task_path(task_id: &TaskId) -> Result<String> {
    Ok(format!("{}/{}", TASKS, path_segment(task_id.as_str())?))
}

/// Blocks on a remote task until it reaches a terminal state
pub struct TaskPoller<C> {
    /// Remote client
    client: Arc<C>,

    /// Interval and deadline
    settings: PollerSettings,
}

impl<C: RemoteClient> TaskPoller<C> {
    /// Creates a poller sharing the given client
    pub fn new(client: Arc<C>, settings: PollerSettings) -> Self {
        Self { client, settings }
    }

    /// Interval and deadline used by this poller
    pub fn settings(&self) -> PollerSettings {
        self.settings
    }

    /// Waits for the task and returns the identifier it produced.
    ///
    /// The first query is sent one interval after the call. `TaskTimedOut` and
    /// `TaskCancelled` leave the remote task running; its outcome is unknown.
    /// Settings with no room for a single query are rejected up front.
    pub async fn wait_for_completion(&self, task_id: &TaskId, cancel: &CancellationToken) -> Result<RemoteId> {
        self.settings.validate()?;

        let started = Instant::now();

        let deadline = sleep_until(started + self.settings.timeout);
        tokio::pin!(deadline);

        let mut ticker = interval_at(started + self.settings.interval, self.settings.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut polls: u32 = 0;

        debug!(
            task_id = %task_id,
            interval_ms = self.settings.interval.as_millis() as u64,
            timeout_ms = self.settings.timeout.as_millis() as u64,
            "Waiting for task"
        );

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    warn!(task_id = %task_id, polls, elapsed_ms = started.elapsed().as_millis() as u64, "Task wait cancelled");
                    return Err(Error::TaskCancelled { task_id: task_id.to_string() });
                }

                _ = &mut deadline => {
                    let elapsed = started.elapsed();
                    warn!(task_id = %task_id, polls, elapsed_ms = elapsed.as_millis() as u64, "Task wait timed out");
                    return Err(Error::TaskTimedOut { elapsed, task_id: task_id.to_string() });
                }

                _ = ticker.tick() => {
                    polls += 1;

                    match self.poll_once(task_id).await? {
                        PollState::Waiting(state) => {
                            debug!(task_id = %task_id, state = %state, polls, "Task still in progress");
                        }
                        PollState::Done(id) => {
                            info!(
                                task_id = %task_id,
                                id = %id,
                                polls,
                                elapsed_ms = started.elapsed().as_millis() as u64,
                                "Task completed"
                            );
                            return Ok(id);
                        }
                        PollState::Failed(detail) => {
                            warn!(task_id = %task_id, polls, detail = %truncate_for_log(&detail, 512), "Task failed");
                            return Err(Error::TaskFailed { task_id: task_id.to_string(), detail });
                        }
                    }
                }
            }
        }
    }

    /// Queries the task once and classifies the answer.
    ///
    /// Non-2xx statuses surface immediately as `RemoteRejected`; nothing is
    /// retried here.
    pub async fn poll_once(&self, task_id: &TaskId) -> Result<PollState> {
        let response = self.client.perform(RemoteRequest::get(task_path(task_id)?)).await?;

        if !response.is_success() {
            return Err(Error::rejected(response.status, response.body_text()));
        }

        classify(&response.body)
    }
}
