//! Backend interface the core depends on
//!
//! The poll loop and front-ends only ever see this two-operation trait; any
//! concrete backend binding implements it, which keeps the core deterministic
//! to test and free of network concerns.

use async_trait::async_trait;
use serde::Serialize;

use crate::attachment::Attachment;
use crate::task::{ServiceMode, Task};
use crate::Result;

/// Parameters for creating a review task
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Natural-language request for the reviewer
    pub prompt: String,
    /// Credit ceiling for the task
    pub max_credits: u32,
    /// Project the task is filed under
    pub project_id: u64,
    /// Processing tier
    pub mode: ServiceMode,
    /// Free-form metadata forwarded to the backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Normalized attachments; omitted entirely when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Optional expertise tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<u64>,
}

/// The two backend operations the core needs
///
/// No retry logic lives behind this trait: a single network failure from
/// either operation propagates as-is to the caller.
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// Create a task and return it with its identifier and initial status
    async fn create(&self, request: &CreateTaskRequest) -> Result<Task>;

    /// Fetch the current state of a task by identifier
    async fn retrieve(&self, task_id: &str) -> Result<Task>;
}
