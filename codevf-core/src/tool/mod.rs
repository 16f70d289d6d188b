//! Tool front-ends over the CodeVF backend
//!
//! Two thin front-ends share the same create-then-poll flow: [`ReviewTool`]
//! returns the normalized output string and fails hard on any terminal state
//! other than `completed`; [`HumanInTheLoop`] instead maps every terminal
//! state into an approved/cancelled outcome.

mod hitl;
mod output;
mod poll;
mod review;

pub use hitl::{HumanInTheLoop, Invocation, Outcome};
pub use review::{ReviewTool, TOOL_DESCRIPTION, TOOL_NAME};

use std::time::Duration;

use serde::Deserialize;

use crate::task::ServiceMode;
use crate::timeout::PollTimeout;
use crate::{Error, Result};

/// Default credit ceiling per request
pub const DEFAULT_MAX_CREDITS: u32 = 50;

/// Default seconds between status checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Configuration for a tool front-end
///
/// Environment and CLI resolution stays in the boundary layer; the core only
/// ever sees this explicit structure.
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    /// Project the tasks are filed under
    pub project_id: u64,
    /// Credit ceiling per request; also drives the default timeout
    pub max_credits: u32,
    /// Processing tier
    pub mode: ServiceMode,
    /// Time between status checks
    pub poll_interval: Duration,
    /// Explicit timeout in seconds; `-1` for infinite; derived from the
    /// credit budget when absent
    pub timeout_secs: Option<f64>,
    /// Default expertise tag for created tasks
    pub tag_id: Option<u64>,
    /// Free-form metadata forwarded with every request
    pub metadata: Option<serde_json::Value>,
}

impl ReviewOptions {
    /// Options with defaults for the given project
    pub fn new(project_id: u64) -> Self {
        Self {
            project_id,
            max_credits: DEFAULT_MAX_CREDITS,
            mode: ServiceMode::Standard,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout_secs: None,
            tag_id: None,
            metadata: None,
        }
    }

    /// Set the credit ceiling
    pub fn with_max_credits(mut self, max_credits: u32) -> Self {
        self.max_credits = max_credits;
        self
    }

    /// Set the processing tier
    pub fn with_mode(mut self, mode: ServiceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the time between status checks
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set an explicit timeout in seconds (`-1` for infinite)
    pub fn with_timeout_secs(mut self, timeout_secs: f64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set the default expertise tag
    pub fn with_tag_id(mut self, tag_id: u64) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    /// Attach free-form metadata to every request
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Validate the options and resolve the effective timeout
    pub(crate) fn resolve_timeout(&self) -> Result<PollTimeout> {
        if self.poll_interval.is_zero() {
            return Err(Error::Config(
                "poll_interval must be greater than zero".to_string(),
            ));
        }
        PollTimeout::resolve(self.timeout_secs, Some(self.max_credits))
    }
}

/// Structured-call input from an agent framework
///
/// Attachments stay loose JSON here; they go through
/// [`normalize_attachments`](crate::attachment::normalize_attachments)
/// before any network call.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolInput {
    /// Natural-language request for the reviewer
    pub prompt: String,
    /// Optional files/logs to attach, in either naming convention
    #[serde(default)]
    pub attachments: Option<Vec<serde_json::Value>>,
    /// Optional expertise tag, overriding the configured one
    #[serde(default, alias = "tagId")]
    pub tag_id: Option<u64>,
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted backend double shared by the tool tests

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::api::{CreateTaskRequest, TasksApi};
    use crate::task::{Task, TaskResult};
    use crate::Result;

    pub(crate) fn task(id: &str, status: &str) -> Task {
        Task {
            id: id.to_string(),
            status: status.to_string(),
            mode: None,
            max_credits: None,
            created_at: None,
            result: None,
        }
    }

    pub(crate) fn task_with_result(id: &str, status: &str, result: TaskResult) -> Task {
        Task {
            result: Some(result),
            ..task(id, status)
        }
    }

    /// Backend double replaying a scripted sequence of retrieve responses
    ///
    /// The last scripted response repeats once the queue would run dry.
    pub(crate) struct ScriptedApi {
        created: Task,
        responses: Mutex<VecDeque<Task>>,
        pub(crate) requests: Mutex<Vec<CreateTaskRequest>>,
        pub(crate) retrieve_count: AtomicUsize,
    }

    impl ScriptedApi {
        pub(crate) fn new(created: Task, responses: Vec<Task>) -> Self {
            Self {
                created,
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
                retrieve_count: AtomicUsize::new(0),
            }
        }

        pub(crate) fn retrieves(&self) -> usize {
            self.retrieve_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TasksApi for ScriptedApi {
        async fn create(&self, request: &CreateTaskRequest) -> Result<Task> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.created.clone())
        }

        async fn retrieve(&self, task_id: &str) -> Result<Task> {
            assert_eq!(task_id, self.created.id);
            self.retrieve_count.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.len() > 1 {
                Ok(responses.pop_front().unwrap())
            } else {
                Ok(responses.front().cloned().expect("scripted response"))
            }
        }
    }
}
