//! # zf-store
//!
//! The ZenFocus task store: an in-memory working set of tasks kept consistent
//! with the remote record service.
//!
//! Every mutation follows the same protocol:
//! 1. Check preconditions against local state (never sent to the network)
//! 2. Apply the change locally, before any suspension point
//! 3. Confirm it with the record service
//! 4. On remote failure, reconcile with a full reload
//!
//! At most one task is in the focus basket at a time; `move_to_basket`
//! refuses while another task holds it.

pub mod error;
mod mutations;
mod queries;
mod store;
#[cfg(test)]
mod test_support;

pub use error::StoreError;
pub use mutations::MutationOutcome;
pub use queries::{Board, QuadrantColumn};
pub use store::TaskStore;
