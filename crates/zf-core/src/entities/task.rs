use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Quadrant, TaskStatus};
use crate::errors::CoreError;

/// A prioritized work item on the board.
///
/// `id` and `created_at` are assigned by the record service at insert time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quadrant: Quadrant,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Description text, treating an empty string the same as absent.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    #[must_use]
    pub fn is_in_basket(&self) -> bool {
        self.status == TaskStatus::Basket
    }

    /// Return a copy of this task with `next` as its status.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if the lifecycle forbids the move.
    pub fn transitioned(&self, next: TaskStatus) -> Result<Self, CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        Ok(Self {
            status: next,
            ..self.clone()
        })
    }

    /// Move the task to another quadrant. Status and identity are untouched.
    pub const fn recategorize(&mut self, quadrant: Quadrant) {
        self.quadrant = quadrant;
    }
}

/// Insert payload for a new task. The record service assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quadrant: Quadrant,
    pub status: TaskStatus,
}

impl NewTask {
    /// Build a backlog task from user input.
    ///
    /// The title is trimmed and must be non-empty. A blank description is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the title is empty after trimming.
    pub fn backlog(
        title: &str,
        description: Option<&str>,
        quadrant: Quadrant,
    ) -> Result<Self, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("task title must not be empty".into()));
        }
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        Ok(Self {
            title: title.to_string(),
            description,
            quadrant,
            status: TaskStatus::Backlog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(status: TaskStatus) -> Task {
        Task {
            id: "c0ffee00-0000-4000-8000-000000000001".into(),
            title: "Write quarterly report".into(),
            description: Some(String::new()),
            quadrant: Quadrant::Q2,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn backlog_trims_title_and_drops_blank_description() {
        let new = NewTask::backlog("  Call the bank  ", Some("   "), Quadrant::Q1).unwrap();
        assert_eq!(new.title, "Call the bank");
        assert_eq!(new.description, None);
        assert_eq!(new.status, TaskStatus::Backlog);
    }

    #[test]
    fn backlog_keeps_trimmed_description() {
        let new = NewTask::backlog("Pay rent", Some(" before the 5th "), Quadrant::Q1).unwrap();
        assert_eq!(new.description.as_deref(), Some("before the 5th"));
    }

    #[test]
    fn backlog_rejects_whitespace_title() {
        let err = NewTask::backlog(" \t\n", Some("desc"), Quadrant::Q1).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn new_task_serializes_without_absent_description() {
        let new = NewTask::backlog("Plan trip", None, Quadrant::Q4).unwrap();
        let json = serde_json::to_value(&new).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Plan trip", "quadrant": 4, "status": "backlog"})
        );
    }

    #[test]
    fn transitioned_follows_lifecycle() {
        let task = sample_task(TaskStatus::Backlog);
        let focused = task.transitioned(TaskStatus::Basket).unwrap();
        assert!(focused.is_in_basket());
        assert_eq!(focused.id, task.id);

        let err = task.transitioned(TaskStatus::Completed).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition {
                from: TaskStatus::Backlog,
                to: TaskStatus::Completed,
                ..
            }
        ));
    }

    #[test]
    fn empty_description_reads_as_absent() {
        let task = sample_task(TaskStatus::Backlog);
        assert_eq!(task.description(), None);
    }

    #[test]
    fn recategorize_changes_only_quadrant() {
        let mut task = sample_task(TaskStatus::Basket);
        task.recategorize(Quadrant::Q3);
        assert_eq!(task.quadrant, Quadrant::Q3);
        assert_eq!(task.status, TaskStatus::Basket);
    }

    #[test]
    fn deserializes_record_with_null_description() {
        let json = r#"{
            "id": "7b1e",
            "title": "Review PR",
            "description": null,
            "quadrant": 3,
            "status": "basket",
            "created_at": "2026-02-09T14:30:00.123456+00:00"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.quadrant, Quadrant::Q3);
        assert_eq!(task.status, TaskStatus::Basket);
        assert!(task.description.is_none());
    }
}
