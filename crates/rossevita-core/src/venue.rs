use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The three venues the business operates. Task lists are keyed by venue
/// slug; unknown slugs are accepted as client-defined venues.
pub const DEFAULT_VENUES: &[&str] = &["constituyentes", "illia", "canuelas"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskComment {
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A maintenance/preparation task attached to one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueTask {
    pub id: String,
    pub name: String,
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
    #[serde(default)]
    pub comments: Vec<TaskComment>,
    /// Attachment object paths linked to this task.
    #[serde(default)]
    pub files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_round_trips_through_strings() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            assert_eq!(TaskStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::from_str("cancelled"), None);
    }

    #[test]
    fn venue_task_tolerates_missing_comment_and_file_arrays() {
        let task: VenueTask = serde_json::from_str(
            r#"{"id":"1","name":"Revisar equipos de sonido","deadline":"2025-11-05","status":"in_progress"}"#,
        )
        .unwrap();
        assert!(task.comments.is_empty());
        assert!(task.files.is_empty());
    }
}
