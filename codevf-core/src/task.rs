//! Task models for the CodeVF review API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Statuses after which a task never changes again
pub const TERMINAL_STATUSES: [&str; 5] = ["completed", "failed", "canceled", "cancelled", "expired"];

/// Returns true if the given status is terminal (case-insensitive)
pub fn is_terminal_status(status: &str) -> bool {
    TERMINAL_STATUSES
        .iter()
        .any(|terminal| status.eq_ignore_ascii_case(terminal))
}

/// Service mode (quality/speed tier) for processing a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    /// Standard processing tier
    #[default]
    Standard,
    /// Faster turnaround tier
    Fast,
    /// Backend-defined tier not known to this client, passed through verbatim
    #[serde(untagged)]
    Custom(String),
}

impl std::str::FromStr for ServiceMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "standard" => ServiceMode::Standard,
            "fast" => ServiceMode::Fast,
            _ => ServiceMode::Custom(s.to_string()),
        })
    }
}

impl std::fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceMode::Standard => write!(f, "standard"),
            ServiceMode::Fast => write!(f, "fast"),
            ServiceMode::Custom(mode) => write!(f, "{}", mode),
        }
    }
}

/// A backend-tracked unit of review work
///
/// Tasks are owned by the backend; this client only ever reads them after
/// creation and never mutates them locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque task identifier
    pub id: String,
    /// Backend-defined status vocabulary, compared case-insensitively
    pub status: String,
    /// Service mode the task was created with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ServiceMode>,
    /// Credit ceiling for the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_credits: Option<u32>,
    /// When the backend created the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Result payload, present once the task produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResult>,
}

impl Task {
    /// Whether the task has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        is_terminal_status(&self.status)
    }

    /// Case-insensitive status comparison
    pub fn has_status(&self, status: &str) -> bool {
        self.status.eq_ignore_ascii_case(status)
    }
}

/// Result payload of a terminal task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    /// Human-readable response from the reviewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Output artifacts referenced by URL
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deliverables: Vec<Deliverable>,
}

/// A named output artifact produced by a completed task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    /// File name of the artifact
    pub file_name: String,
    /// Where the artifact can be downloaded
    pub url: String,
}
