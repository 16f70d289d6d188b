//! Task endpoints of the CodeVF API

use async_trait::async_trait;
use tracing::debug;

use codevf_core::{CreateTaskRequest, Task, TasksApi};

use crate::{CodeVfClient, Error, Result};

impl CodeVfClient {
    /// Create a review task (`POST /tasks`)
    pub async fn create_task(&self, request: &CreateTaskRequest) -> Result<Task> {
        let url = self.endpoint("tasks")?;
        debug!(project_id = request.project_id, "creating CodeVF task");

        let response = self
            .http()
            .post(url)
            .bearer_auth(self.api_key())
            .json(request)
            .send()
            .await?;

        let task: Task = check_status(response).await?.json().await?;
        debug!(task_id = %task.id, status = %task.status, "CodeVF task created");
        Ok(task)
    }

    /// Fetch a task by identifier (`GET /tasks/{id}`)
    pub async fn retrieve_task(&self, task_id: &str) -> Result<Task> {
        let url = self.endpoint(&format!("tasks/{}", task_id))?;

        let response = self
            .http()
            .get(url)
            .bearer_auth(self.api_key())
            .send()
            .await?;

        Ok(check_status(response).await?.json().await?)
    }
}

/// Map non-success responses to a typed API error carrying the body text
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(Error::Api { status, message })
}

#[async_trait]
impl TasksApi for CodeVfClient {
    async fn create(&self, request: &CreateTaskRequest) -> codevf_core::Result<Task> {
        self.create_task(request).await.map_err(codevf_core::Error::backend)
    }

    async fn retrieve(&self, task_id: &str) -> codevf_core::Result<Task> {
        self.retrieve_task(task_id).await.map_err(codevf_core::Error::backend)
    }
}
