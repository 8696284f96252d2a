//! Read-only views derived from the current local collection.

use serde::Serialize;
use zf_core::entities::Task;
use zf_core::enums::{Quadrant, TaskStatus};
use zf_core::quadrant::{QUADRANTS, QuadrantInfo};
use zf_remote::RemoteError;

use crate::error::StoreError;
use crate::store::TaskStore;

/// One column of the matrix: a quadrant and its backlog tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuadrantColumn {
    pub info: &'static QuadrantInfo,
    pub tasks: Vec<Task>,
}

/// Everything a board render needs, taken from a single snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub active: Option<Task>,
    /// In `Quadrant::ALL` order.
    pub quadrants: Vec<QuadrantColumn>,
    pub completed_count: usize,
}

pub(crate) fn basket_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_in_basket()).count()
}

/// First basket task. Logs when more than one is present.
fn active_in(tasks: &[Task]) -> Option<&Task> {
    let mut in_basket = tasks.iter().filter(|t| t.is_in_basket());
    let first = in_basket.next()?;
    let extra = in_basket.count();
    if extra > 0 {
        tracing::warn!(
            active = %first.id,
            extra,
            "single-focus invariant violated: multiple tasks in basket"
        );
    }
    Some(first)
}

fn backlog_in(tasks: &[Task], quadrant: Option<Quadrant>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Backlog)
        .filter(|t| quadrant.is_none_or(|q| t.quadrant == q))
        .cloned()
        .collect()
}

fn completed_in(tasks: &[Task]) -> usize {
    tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count()
}

impl TaskStore {
    /// Snapshot of the whole collection, newest first.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.read().tasks.clone()
    }

    /// Local copy of one task.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<Task> {
        self.read().tasks.iter().find(|t| t.id == id).cloned()
    }

    /// The task in the focus basket, if any.
    #[must_use]
    pub fn active_task(&self) -> Option<Task> {
        active_in(&self.read().tasks).cloned()
    }

    #[must_use]
    pub fn has_active_task(&self) -> bool {
        self.read().tasks.iter().any(Task::is_in_basket)
    }

    /// All backlog tasks in collection order.
    #[must_use]
    pub fn backlog_tasks(&self) -> Vec<Task> {
        backlog_in(&self.read().tasks, None)
    }

    /// Backlog tasks in `quadrant`, in collection order.
    #[must_use]
    pub fn backlog_by_quadrant(&self, quadrant: Quadrant) -> Vec<Task> {
        backlog_in(&self.read().tasks, Some(quadrant))
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        completed_in(&self.read().tasks)
    }

    /// Active task, per-quadrant backlog and completed count from one snapshot.
    #[must_use]
    pub fn board(&self) -> Board {
        let state = self.read();
        let tasks = &state.tasks;
        Board {
            active: active_in(tasks).cloned(),
            quadrants: QUADRANTS
                .iter()
                .map(|info| QuadrantColumn {
                    info,
                    tasks: backlog_in(tasks, Some(info.id)),
                })
                .collect(),
            completed_count: completed_in(tasks),
        }
    }

    /// Whether a load is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loads_in_flight > 0
    }

    /// Error of the last failed load, until a later load starts.
    #[must_use]
    pub fn load_error(&self) -> Option<RemoteError> {
        self.read().load_error.clone()
    }

    /// Verify the single-focus invariant over the current collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConsistencyViolation` naming the basket tasks when
    /// more than one is present.
    pub fn check_invariants(&self) -> Result<(), StoreError> {
        let state = self.read();
        let ids: Vec<&str> = state
            .tasks
            .iter()
            .filter(|t| t.is_in_basket())
            .map(|t| t.id.as_str())
            .collect();
        if ids.len() > 1 {
            return Err(StoreError::ConsistencyViolation(format!(
                "{} tasks in basket: {}",
                ids.len(),
                ids.join(", ")
            )));
        }
        Ok(())
    }
}
