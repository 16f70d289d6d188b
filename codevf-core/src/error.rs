//! Error types for the CodeVF integration

use std::time::Duration;

use thiserror::Error;

use crate::timeout::format_secs;

/// Result type alias for CodeVF operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for CodeVF operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (invalid timeout, missing credit budget, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed attachment, rejected before any network call
    #[error("invalid attachment: {0}")]
    Attachment(String),

    /// Polling deadline exceeded while the task remained non-terminal
    #[error(
        "invoke timed out after {} while waiting for CodeVF task '{task_id}' \
         (configured timeout: {}); increase the timeout with --timeout <seconds> \
         or disable it with --timeout -1",
        format_secs(*.elapsed),
        format_secs(*.deadline)
    )]
    Timeout {
        /// Identifier of the task that was being polled
        task_id: String,
        /// Time spent polling before giving up
        elapsed: Duration,
        /// The configured deadline that was exceeded
        deadline: Duration,
    },

    /// Task reached a terminal state other than `completed`
    #[error("CodeVF task '{task_id}' finished with status '{status}'")]
    TaskFailed {
        /// Identifier of the failed task
        task_id: String,
        /// The terminal status reported by the backend
        status: String,
    },

    /// Error from the backend client, propagated unmodified (no retries)
    #[error("CodeVF backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap a backend client error without losing its source chain
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Backend(Box::new(err))
    }
}
