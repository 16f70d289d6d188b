//! CodeVF Core - Core library for the CodeVF review tool integration
//!
//! This crate exposes the CodeVF asynchronous review backend as a callable
//! tool: it normalizes attachments, submits a task, polls until a terminal
//! state or deadline, and formats the result for the caller.

pub mod api;
pub mod attachment;
pub mod error;
pub mod task;
pub mod timeout;
pub mod tool;

pub use api::{CreateTaskRequest, TasksApi};
pub use attachment::{coalesce_attachments, normalize_attachments, Attachment};
pub use error::{Error, Result};
pub use task::{Deliverable, ServiceMode, Task, TaskResult};
pub use timeout::PollTimeout;
pub use tool::{HumanInTheLoop, Invocation, Outcome, ReviewOptions, ReviewTool, ToolInput};
