//! Task mutations: create, lifecycle transitions, delete.
//!
//! Transitions and deletes run in two phases. `apply` checks preconditions
//! and edits local state under one write lock, before the first `.await`.
//! `confirm` sends the matching write to the record service and, if it
//! fails, falls back to the single `reconcile` path (a full reload).

use zf_core::entities::{NewTask, Task};
use zf_core::enums::{Quadrant, TaskStatus};
use zf_remote::{RemoteError, RemoteRecordService, TaskPatch};

use crate::error::StoreError;
use crate::store::TaskStore;

/// What happened to a mutation after its local change was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The record service accepted the write.
    Confirmed,
    /// The record service rejected the write and the board was reloaded.
    /// A failure of that reload is reported by `TaskStore::load_error`.
    Reconciled { cause: RemoteError },
}

impl MutationOutcome {
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// Remote half of a mutation already applied locally.
#[derive(Debug)]
enum PendingWrite {
    Update { id: String, patch: TaskPatch },
    Delete { id: String },
}

impl TaskStore {
    /// Insert a new backlog task and prepend it to the local collection.
    ///
    /// Not optimistic: the task only appears once the record service has
    /// assigned its id and timestamp. A reload that already picked up the new
    /// record while the insert was in flight wins; it is not added twice.
    ///
    /// # Errors
    ///
    /// - `StoreError::ConfigurationMissing` when unconfigured
    /// - `StoreError::Validation` for a blank title (no remote call is made)
    /// - `StoreError::Remote` if the insert fails; the collection is unchanged
    pub async fn create(
        &self,
        title: &str,
        description: Option<&str>,
        quadrant: Quadrant,
    ) -> Result<Task, StoreError> {
        let remote = self.remote()?;
        let new = NewTask::backlog(title, description, quadrant)?;

        let task = remote.insert(&new).await.inspect_err(|e| {
            tracing::warn!(error = %e, title = %new.title, "failed to create task");
        })?;

        {
            let mut state = self.write();
            if state.tasks.iter().any(|t| t.id == task.id) {
                tracing::debug!(id = %task.id, "created task already present from a reload");
            } else {
                state.tasks.insert(0, task.clone());
            }
        }
        tracing::info!(id = %task.id, quadrant = %task.quadrant, "task created");
        Ok(task)
    }

    /// Put a backlog task into the focus basket.
    ///
    /// # Errors
    ///
    /// Rejected without any local change or remote call when:
    /// - `StoreError::FocusOccupied`: another task is already in the basket
    /// - `StoreError::InvalidTransition`: the task is not in the backlog
    /// - `StoreError::NotFound`: no such task locally
    /// - `StoreError::ConfigurationMissing`: the store is unconfigured
    pub async fn move_to_basket(&self, id: &str) -> Result<MutationOutcome, StoreError> {
        self.transition(id, TaskStatus::Basket).await
    }

    /// Send the basket task back to the backlog.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidTransition` unless the task is in the basket,
    /// `StoreError::NotFound` or `StoreError::ConfigurationMissing`.
    pub async fn return_to_backlog(&self, id: &str) -> Result<MutationOutcome, StoreError> {
        self.transition(id, TaskStatus::Backlog).await
    }

    /// Mark the basket task as completed. The only way to complete a task.
    ///
    /// # Errors
    ///
    /// `StoreError::InvalidTransition` unless the task is in the basket,
    /// `StoreError::NotFound` or `StoreError::ConfigurationMissing`.
    pub async fn complete(&self, id: &str) -> Result<MutationOutcome, StoreError> {
        self.transition(id, TaskStatus::Completed).await
    }

    /// Remove a task locally and then remotely.
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the task is not in the local collection, or
    /// `StoreError::ConfigurationMissing`.
    pub async fn delete(&self, id: &str) -> Result<MutationOutcome, StoreError> {
        let remote = self.remote()?;
        let pending = self.apply_delete(id)?;
        Ok(self.confirm(remote.as_ref(), pending).await)
    }

    async fn transition(&self, id: &str, next: TaskStatus) -> Result<MutationOutcome, StoreError> {
        let remote = self.remote()?;
        let pending = self.apply_transition(id, next)?;
        Ok(self.confirm(remote.as_ref(), pending).await)
    }

    fn apply_transition(&self, id: &str, next: TaskStatus) -> Result<PendingWrite, StoreError> {
        let mut state = self.write();
        let idx = state
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let updated = state.tasks[idx].transitioned(next)?;

        if next == TaskStatus::Basket {
            if let Some(active) = state.tasks.iter().find(|t| t.is_in_basket()) {
                return Err(StoreError::FocusOccupied {
                    active_id: active.id.clone(),
                });
            }
        }

        let from = state.tasks[idx].status;
        state.tasks[idx] = updated;
        tracing::info!(id, %from, to = %next, "task status applied locally");

        Ok(PendingWrite::Update {
            id: id.to_string(),
            patch: TaskPatch::status(next),
        })
    }

    fn apply_delete(&self, id: &str) -> Result<PendingWrite, StoreError> {
        let mut state = self.write();
        let idx = state
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        state.tasks.remove(idx);
        tracing::info!(id, "task removed locally");

        Ok(PendingWrite::Delete { id: id.to_string() })
    }

    async fn confirm(
        &self,
        remote: &dyn RemoteRecordService,
        pending: PendingWrite,
    ) -> MutationOutcome {
        let result = match &pending {
            PendingWrite::Update { id, patch } => remote.update(id, patch).await,
            PendingWrite::Delete { id } => remote.delete(id).await,
        };

        match result {
            Ok(()) => MutationOutcome::Confirmed,
            Err(cause) => {
                tracing::warn!(error = %cause, write = ?pending, "remote write failed; reloading board");
                self.reconcile().await;
                MutationOutcome::Reconciled { cause }
            }
        }
    }
}
