//! # zf-remote
//!
//! Remote record service access for ZenFocus.
//!
//! The board talks to its source of truth through [`RemoteRecordService`], a
//! CRUD contract over the `tasks` collection. [`RestRecordService`] speaks the
//! PostgREST dialect exposed by Supabase; `MemoryRecordService` (feature
//! `test-support`) keeps records in process and can inject failures.

mod error;
mod http;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
mod rest;

pub use error::RemoteError;
pub use rest::RestRecordService;

use async_trait::async_trait;
use serde::Serialize;
use zf_core::entities::{NewTask, Task};
use zf_core::enums::{Quadrant, TaskStatus};

// ── Types ──────────────────────────────────────────────────────────

/// Partial task fields for an update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<Quadrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Patch that only changes the lifecycle status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.quadrant.is_none()
            && self.status.is_none()
    }

    /// Apply the present fields to `task` in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description.clone_from(description);
        }
        if let Some(quadrant) = self.quadrant {
            task.recategorize(quadrant);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

// ── Contract ───────────────────────────────────────────────────────

/// CRUD access to the remote `tasks` collection.
///
/// Every call is applied atomically by the service on its own; there is no
/// cross-call transaction.
#[async_trait]
pub trait RemoteRecordService: Send + Sync {
    /// Every task, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Task>, RemoteError>;

    /// Insert a task. The service assigns `id` and `created_at`.
    async fn insert(&self, task: &NewTask) -> Result<Task, RemoteError>;

    /// Apply `patch` to the task with `id`.
    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<(), RemoteError>;

    /// Remove the task with `id`.
    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn status_patch_serializes_only_status() {
        let patch = TaskPatch::status(TaskStatus::Basket);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"status": "basket"}));
    }

    #[test]
    fn clearing_description_serializes_null() {
        let patch = TaskPatch {
            description: Some(None),
            ..TaskPatch::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"description": null}));
    }

    #[test]
    fn apply_to_updates_present_fields() {
        let mut task = Task {
            id: "1".into(),
            title: "Old".into(),
            description: Some("keep".into()),
            quadrant: Quadrant::Q1,
            status: TaskStatus::Backlog,
            created_at: Utc::now(),
        };
        let patch = TaskPatch {
            title: Some("New".into()),
            quadrant: Some(Quadrant::Q2),
            ..TaskPatch::default()
        };
        patch.apply_to(&mut task);
        assert_eq!(task.title, "New");
        assert_eq!(task.quadrant, Quadrant::Q2);
        assert_eq!(task.description.as_deref(), Some("keep"));
        assert_eq!(task.status, TaskStatus::Backlog);
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::status(TaskStatus::Completed).is_empty());
    }
}
