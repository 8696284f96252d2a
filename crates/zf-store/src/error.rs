//! Store error types for zf-store.

use thiserror::Error;
use zf_core::enums::TaskStatus;
use zf_core::errors::CoreError;
use zf_remote::RemoteError;

/// Errors from task store operations.
///
/// Everything except `Remote` is raised before any network call is made.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No usable remote configuration; the board is in its setup-required state.
    #[error("{0}")]
    ConfigurationMissing(String),

    /// Input rejected locally (e.g., a blank title).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The task's current status does not allow the requested move.
    #[error("Invalid state transition: task {id} from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: TaskStatus,
        to: TaskStatus,
    },

    /// Another task already holds the focus basket.
    #[error("Focus basket is occupied by task {active_id}")]
    FocusOccupied { active_id: String },

    /// No task with this id in the local collection.
    #[error("Task not found: {id}")]
    NotFound { id: String },

    /// The record service call failed.
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// More than one task observed in the basket.
    #[error("Consistency violation: {0}")]
    ConsistencyViolation(String),
}

impl From<CoreError> for StoreError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::InvalidTransition { id, from, to } => {
                Self::InvalidTransition { id, from, to }
            }
        }
    }
}
