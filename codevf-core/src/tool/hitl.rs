//! Human-in-the-loop front-end
//!
//! Unlike [`ReviewTool`](crate::tool::ReviewTool), this variant never fails
//! on a backend task failure: every terminal state is normalized into an
//! approved/cancelled outcome so the caller always gets a decision.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{CreateTaskRequest, TasksApi};
use crate::attachment::{coalesce_attachments, normalize_attachments, Attachment};
use crate::task::Task;
use crate::timeout::PollTimeout;
use crate::tool::output::{extract_output, is_cancelled_family};
use crate::tool::poll::poll_until_terminal;
use crate::tool::{ReviewOptions, ToolInput};
use crate::Result;

/// Coarse outcome tag of a human-in-the-loop invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The task completed
    Approved,
    /// The task failed, was cancelled, or expired
    Cancelled,
    /// Any other terminal status, passed through in lowercase
    #[serde(untagged)]
    Other(String),
}

/// Normalized result of a human-in-the-loop invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Outcome tag
    pub status: Outcome,
    /// Normalized output text
    pub output: String,
}

/// Human-in-the-loop convenience wrapper around the CodeVF backend
pub struct HumanInTheLoop {
    api: Arc<dyn TasksApi>,
    options: ReviewOptions,
    timeout: PollTimeout,
}

impl HumanInTheLoop {
    /// Build the wrapper, validating options and resolving the timeout
    pub fn new(api: Arc<dyn TasksApi>, options: ReviewOptions) -> Result<Self> {
        let timeout = options.resolve_timeout()?;
        Ok(Self {
            api,
            options,
            timeout,
        })
    }

    /// The configured options
    pub fn options(&self) -> &ReviewOptions {
        &self.options
    }

    /// The effective timeout after resolution
    pub fn timeout(&self) -> PollTimeout {
        self.timeout
    }

    /// Submit a request and wait for a terminal outcome
    ///
    /// A per-call `tag_id` overrides the configured one. A timeout or a
    /// backend failure from create/retrieve still surfaces as an error;
    /// terminal task states never do.
    pub async fn invoke(
        &self,
        prompt: impl Into<String>,
        attachments: Option<Vec<Attachment>>,
        tag_id: Option<u64>,
    ) -> Result<Invocation> {
        let request = CreateTaskRequest {
            prompt: prompt.into(),
            max_credits: self.options.max_credits,
            project_id: self.options.project_id,
            mode: self.options.mode.clone(),
            metadata: self.options.metadata.clone(),
            attachments: attachments.and_then(coalesce_attachments),
            tag_id: tag_id.or(self.options.tag_id),
        };

        info!(timeout = %self.timeout, "starting CodeVF invocation");
        let created = self.api.create(&request).await?;
        debug!(task_id = %created.id, status = %created.status, "task created");

        let task = poll_until_terminal(
            self.api.as_ref(),
            &created.id,
            self.options.poll_interval,
            self.timeout,
        )
        .await?;

        Ok(invocation_for(&task))
    }

    /// Structured-call entry point for agent frameworks
    pub async fn call(&self, input: ToolInput) -> Result<Invocation> {
        let attachments = normalize_attachments(input.attachments)?;
        self.invoke(input.prompt, attachments, input.tag_id).await
    }
}

impl std::fmt::Debug for HumanInTheLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumanInTheLoop")
            .field("options", &self.options)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn invocation_for(task: &Task) -> Invocation {
    let output = extract_output(task);
    let status = if task.has_status("completed") {
        Outcome::Approved
    } else if task.has_status("failed") || is_cancelled_family(&task.status) {
        Outcome::Cancelled
    } else {
        Outcome::Other(task.status.to_ascii_lowercase())
    };

    Invocation { status, output }
}
