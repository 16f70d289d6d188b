//! Terminal task output extraction

use crate::task::Task;

const CANCELLED_FAMILY: [&str; 3] = ["canceled", "cancelled", "expired"];

/// Normalize a terminal task into a human-readable output string
///
/// Priority: the reviewer's message, a deliverables listing, a
/// status-specific fallback, then a generic completion fallback. An empty
/// message counts as absent.
pub(crate) fn extract_output(task: &Task) -> String {
    if let Some(result) = &task.result {
        if let Some(message) = &result.message {
            if !message.is_empty() {
                return message.clone();
            }
        }

        if !result.deliverables.is_empty() {
            let mut lines = vec!["CodeVF task completed. Deliverables:".to_string()];
            for deliverable in &result.deliverables {
                lines.push(format!("- {}: {}", deliverable.file_name, deliverable.url));
            }
            return lines.join("\n");
        }
    }

    if task.has_status("failed") {
        return "CodeVF task failed without a text response.".to_string();
    }

    if CANCELLED_FAMILY
        .iter()
        .any(|status| task.has_status(status))
    {
        return "CodeVF task was cancelled.".to_string();
    }

    "CodeVF task completed without a text response.".to_string()
}

/// Whether the status belongs to the cancelled family (case-insensitive)
pub(crate) fn is_cancelled_family(status: &str) -> bool {
    CANCELLED_FAMILY
        .iter()
        .any(|cancelled| status.eq_ignore_ascii_case(cancelled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Deliverable, TaskResult};
    use crate::tool::testing::{task, task_with_result};

    #[test]
    fn test_message_takes_priority() {
        let task = task_with_result(
            "task_1",
            "completed",
            TaskResult {
                message: Some("All good".to_string()),
                deliverables: vec![Deliverable {
                    file_name: "out.txt".to_string(),
                    url: "https://x/out.txt".to_string(),
                }],
            },
        );

        assert_eq!(extract_output(&task), "All good");
    }

    #[test]
    fn test_deliverables_listing_with_banner() {
        let task = task_with_result(
            "task_2",
            "completed",
            TaskResult {
                message: None,
                deliverables: vec![
                    Deliverable {
                        file_name: "out.txt".to_string(),
                        url: "https://x/out.txt".to_string(),
                    },
                    Deliverable {
                        file_name: "report.pdf".to_string(),
                        url: "https://x/report.pdf".to_string(),
                    },
                ],
            },
        );

        let output = extract_output(&task);
        assert_eq!(
            output,
            "CodeVF task completed. Deliverables:\n\
             - out.txt: https://x/out.txt\n\
             - report.pdf: https://x/report.pdf"
        );
    }

    #[test]
    fn test_empty_message_falls_through_to_deliverables() {
        let task = task_with_result(
            "task_3",
            "completed",
            TaskResult {
                message: Some(String::new()),
                deliverables: vec![Deliverable {
                    file_name: "out.txt".to_string(),
                    url: "https://x/out.txt".to_string(),
                }],
            },
        );

        assert!(extract_output(&task).contains("- out.txt: https://x/out.txt"));
    }

    #[test]
    fn test_failed_fallback() {
        assert_eq!(
            extract_output(&task("task_4", "failed")),
            "CodeVF task failed without a text response."
        );
    }

    #[test]
    fn test_cancelled_family_fallback() {
        for status in ["canceled", "cancelled", "EXPIRED"] {
            assert_eq!(
                extract_output(&task("task_5", status)),
                "CodeVF task was cancelled."
            );
        }
    }

    #[test]
    fn test_completed_without_response_fallback() {
        assert_eq!(
            extract_output(&task("task_6", "completed")),
            "CodeVF task completed without a text response."
        );
    }
}
