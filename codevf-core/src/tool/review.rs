//! Direct review tool front-end
//!
//! The strict variant: any terminal state other than `completed` is a hard
//! error. Agent frameworks that want a soft decision instead use
//! [`HumanInTheLoop`](crate::tool::HumanInTheLoop).

use std::sync::Arc;

use tracing::{debug, info};

use crate::api::{CreateTaskRequest, TasksApi};
use crate::attachment::{coalesce_attachments, normalize_attachments, Attachment};
use crate::timeout::PollTimeout;
use crate::tool::output::extract_output;
use crate::tool::poll::poll_until_terminal;
use crate::tool::{ReviewOptions, ToolInput};
use crate::{Error, Result};

/// Tool name advertised to agent frameworks
pub const TOOL_NAME: &str = "codevf_review";

/// Tool description advertised to agent frameworks
pub const TOOL_DESCRIPTION: &str =
    "Send a request to CodeVF for human code review, debugging, or verification.";

/// Direct tool wrapper around the CodeVF backend
pub struct ReviewTool {
    api: Arc<dyn TasksApi>,
    options: ReviewOptions,
    timeout: PollTimeout,
}

impl ReviewTool {
    /// Build the tool, validating options and resolving the timeout
    pub fn new(api: Arc<dyn TasksApi>, options: ReviewOptions) -> Result<Self> {
        let timeout = options.resolve_timeout()?;
        Ok(Self {
            api,
            options,
            timeout,
        })
    }

    /// Tool name for framework registration
    pub fn name(&self) -> &'static str {
        TOOL_NAME
    }

    /// Tool description for framework registration
    pub fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }

    /// The configured options
    pub fn options(&self) -> &ReviewOptions {
        &self.options
    }

    /// Submit a request and wait for the completed output
    ///
    /// Fails with [`Error::TaskFailed`] if the task reaches any terminal
    /// state other than `completed`.
    pub async fn run(
        &self,
        prompt: impl Into<String>,
        attachments: Option<Vec<Attachment>>,
    ) -> Result<String> {
        let request = CreateTaskRequest {
            prompt: prompt.into(),
            max_credits: self.options.max_credits,
            project_id: self.options.project_id,
            mode: self.options.mode.clone(),
            metadata: self.options.metadata.clone(),
            attachments: attachments.and_then(coalesce_attachments),
            tag_id: self.options.tag_id,
        };

        info!(timeout = %self.timeout, "starting CodeVF review");
        let created = self.api.create(&request).await?;
        debug!(task_id = %created.id, status = %created.status, "task created");

        let task = poll_until_terminal(
            self.api.as_ref(),
            &created.id,
            self.options.poll_interval,
            self.timeout,
        )
        .await?;

        if !task.has_status("completed") {
            return Err(Error::TaskFailed {
                task_id: task.id,
                status: task.status,
            });
        }

        Ok(extract_output(&task))
    }

    /// Structured-call entry point for agent frameworks
    pub async fn call(&self, input: ToolInput) -> Result<String> {
        let attachments = normalize_attachments(input.attachments)?;
        self.run(input.prompt, attachments).await
    }
}

impl std::fmt::Debug for ReviewTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewTool")
            .field("options", &self.options)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskResult;
    use crate::tool::testing::{task, task_with_result, ScriptedApi};
    use serde_json::json;

    fn tool(api: ScriptedApi, options: ReviewOptions) -> ReviewTool {
        ReviewTool::new(Arc::new(api), options).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_message_on_completion() {
        let api = ScriptedApi::new(
            task("task_123", "pending"),
            vec![
                task("task_123", "pending"),
                task_with_result(
                    "task_123",
                    "completed",
                    TaskResult {
                        message: Some("All good".to_string()),
                        deliverables: vec![],
                    },
                ),
            ],
        );

        let output = tool(api, ReviewOptions::new(1))
            .run("Review this function for errors.", None)
            .await
            .unwrap();

        assert_eq!(output, "All good");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_task_is_a_hard_error() {
        let api = ScriptedApi::new(task("task_1", "pending"), vec![task("task_1", "failed")]);

        let err = tool(api, ReviewOptions::new(1))
            .run("Review.", None)
            .await
            .unwrap_err();

        match err {
            Error::TaskFailed { task_id, status } => {
                assert_eq!(task_id, "task_1");
                assert_eq!(status, "failed");
            }
            other => panic!("expected task failure, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_maps_attachments_onto_the_request() {
        let api = Arc::new(ScriptedApi::new(
            task("task_456", "pending"),
            vec![task_with_result(
                "task_456",
                "completed",
                TaskResult {
                    message: Some("Done".to_string()),
                    deliverables: vec![],
                },
            )],
        ));
        let tool = ReviewTool::new(api.clone(), ReviewOptions::new(1)).unwrap();

        tool.run(
            "Review this file.",
            Some(vec![Attachment::text(
                "app.py",
                "text/x-python",
                "print('hi')",
            )]),
        )
        .await
        .unwrap();

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            serde_json::to_value(requests[0].attachments.as_ref().unwrap()).unwrap(),
            json!([{"fileName": "app.py", "mimeType": "text/x-python", "content": "print('hi')"}])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_attachment_list_is_omitted() {
        let api = Arc::new(ScriptedApi::new(
            task("task_2", "pending"),
            vec![task("task_2", "completed")],
        ));
        let tool = ReviewTool::new(api.clone(), ReviewOptions::new(1)).unwrap();

        tool.run("Review.", Some(vec![])).await.unwrap();

        assert!(api.requests.lock().unwrap()[0].attachments.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_propagates() {
        let api = ScriptedApi::new(task("task_9", "pending"), vec![task("task_9", "pending")]);
        let tool = tool(api, ReviewOptions::new(1).with_timeout_secs(5.0));

        let err = tool.run("Review this function for errors.", None).await.unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_accepts_structured_input() {
        let api = Arc::new(ScriptedApi::new(
            task("task_7", "pending"),
            vec![task_with_result(
                "task_7",
                "completed",
                TaskResult {
                    message: Some("ok".to_string()),
                    deliverables: vec![],
                },
            )],
        ));
        let tool = ReviewTool::new(api.clone(), ReviewOptions::new(1).with_tag_id(2)).unwrap();

        let input: ToolInput = serde_json::from_value(json!({
            "prompt": "Test structured call.",
            "attachments": [
                {"fileName": "a.py", "mimeType": "text/x-python", "content": "x"}
            ]
        }))
        .unwrap();

        let output = tool.call(input).await.unwrap();
        assert_eq!(output, "ok");
        assert_eq!(tool.name(), "codevf_review");
        assert_eq!(api.requests.lock().unwrap()[0].tag_id, Some(2));
    }
}
