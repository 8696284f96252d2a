//! Cross-cutting error types for ZenFocus.
//!
//! Crate-specific errors (`ConfigError`, `RemoteError`, `StoreError`) live in
//! their own crates and wrap this one where a core rule is violated.

use thiserror::Error;

use crate::enums::TaskStatus;

/// Errors raised by core entity rules.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lifecycle transition was attempted that is not allowed.
    #[error("Invalid state transition: task {id} from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: TaskStatus,
        to: TaskStatus,
    },

    /// Data failed validation (empty title, out-of-range quadrant).
    #[error("Validation error: {0}")]
    Validation(String),
}
