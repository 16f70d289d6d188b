//! Poll-until-terminal loop
//!
//! One logical flow per invocation: retrieve the task, stop on a terminal
//! status, otherwise enforce the deadline and sleep for the poll interval.
//! There is no cancellation beyond the timeout and no retry on failure.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, error};

use crate::api::TasksApi;
use crate::task::Task;
use crate::timeout::{format_secs, PollTimeout};
use crate::{Error, Result};

/// Poll a task by id until it reaches a terminal state or the deadline elapses
///
/// Elapsed time is measured from a monotonic start timestamp taken before the
/// first retrieve. The deadline check uses strict `elapsed > deadline`, so a
/// poll landing exactly on the deadline still goes through.
pub(crate) async fn poll_until_terminal(
    api: &dyn TasksApi,
    task_id: &str,
    poll_interval: Duration,
    timeout: PollTimeout,
) -> Result<Task> {
    let start = Instant::now();
    loop {
        let task = api.retrieve(task_id).await?;
        if task.is_terminal() {
            debug!(task_id, status = %task.status, "task reached terminal state");
            return Ok(task);
        }

        let elapsed = start.elapsed();
        if let Some(deadline) = timeout.deadline() {
            if elapsed > deadline {
                error!(
                    task_id,
                    elapsed = %format_secs(elapsed),
                    deadline = %format_secs(deadline),
                    "invoke timed out waiting for task"
                );
                return Err(Error::Timeout {
                    task_id: task_id.to_string(),
                    elapsed,
                    deadline,
                });
            }
        }

        sleep(poll_interval).await;
    }
}
