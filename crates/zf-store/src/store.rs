//! Store handle, construction, and full-refresh loading.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use zf_config::{FocusConfig, SETUP_GUIDANCE};
use zf_core::entities::Task;
use zf_remote::{RemoteError, RemoteRecordService, RestRecordService};

use crate::error::StoreError;
use crate::queries::basket_count;

/// Mutable board state. Guarded by a lock that is never held across `.await`.
#[derive(Debug, Default)]
pub(crate) struct BoardState {
    /// Newest `created_at` first.
    pub(crate) tasks: Vec<Task>,
    pub(crate) loads_in_flight: usize,
    pub(crate) load_error: Option<RemoteError>,
    /// Ticket handed to the most recently started load.
    pub(crate) issued_loads: u64,
    /// Ticket of the load whose result is currently shown.
    pub(crate) committed_load: u64,
    /// Ticket of the newest load that failed.
    pub(crate) failed_load: u64,
}

/// Shared handle to the board. Clones see the same state.
#[derive(Clone)]
pub struct TaskStore {
    remote: Option<Arc<dyn RemoteRecordService>>,
    state: Arc<RwLock<BoardState>>,
}

impl TaskStore {
    /// Store backed by `remote`, starting empty until [`Self::load`] runs.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteRecordService>) -> Self {
        Self {
            remote: Some(remote),
            state: Arc::default(),
        }
    }

    /// Store in the setup-required state. Every operation is refused.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            remote: None,
            state: Arc::default(),
        }
    }

    /// Build a REST-backed store, or an unconfigured one when `config` has no
    /// usable remote section.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Remote` if the HTTP client cannot be built.
    pub fn from_config(config: &FocusConfig) -> Result<Self, StoreError> {
        for warning in config.unconfigured_warnings(std::env::vars()) {
            tracing::warn!("{warning}");
        }
        if let Err(e) = config.remote.validate() {
            tracing::warn!(reason = %e, "{SETUP_GUIDANCE}");
            return Ok(Self::unconfigured());
        }
        let remote = RestRecordService::new(&config.remote)?;
        tracing::info!(endpoint = config.remote.base_url(), "task store configured");
        Ok(Self::new(Arc::new(remote)))
    }

    /// Whether a record service is attached.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.remote.is_some()
    }

    pub(crate) fn remote(&self) -> Result<Arc<dyn RemoteRecordService>, StoreError> {
        self.remote
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| StoreError::ConfigurationMissing(SETUP_GUIDANCE.to_string()))
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the local collection with the record service's.
    ///
    /// On failure the previous collection stays in place and the error is
    /// kept as [`Self::load_error`] until the next load. When loads overlap,
    /// the most recently started one that succeeds wins. An older load that
    /// succeeds after a newer one failed still commits its data, but leaves
    /// the newer failure in [`Self::load_error`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ConfigurationMissing` without touching the
    /// network when unconfigured, or `StoreError::Remote` if listing fails.
    pub async fn load(&self) -> Result<(), StoreError> {
        let remote = self.remote()?;
        let ticket = {
            let mut state = self.write();
            state.issued_loads += 1;
            state.loads_in_flight += 1;
            state.load_error = None;
            state.issued_loads
        };

        let result = remote.list().await;

        let mut state = self.write();
        state.loads_in_flight -= 1;
        match result {
            Ok(mut tasks) => {
                if ticket < state.committed_load {
                    tracing::debug!(ticket, committed = state.committed_load, "discarding superseded load");
                    return Ok(());
                }
                tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                let in_basket = basket_count(&tasks);
                if in_basket > 1 {
                    tracing::warn!(in_basket, "loaded board holds more than one basket task");
                }
                tracing::info!(count = tasks.len(), "board loaded");
                state.tasks = tasks;
                state.committed_load = ticket;
                if ticket > state.failed_load {
                    state.load_error = None;
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load tasks");
                if ticket > state.committed_load {
                    state.load_error = Some(e.clone());
                    state.failed_load = state.failed_load.max(ticket);
                }
                Err(e.into())
            }
        }
    }

    /// Explicit retry entry point after a failed load.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub async fn retry(&self) -> Result<(), StoreError> {
        self.load().await
    }

    /// Heal after a failed write by reloading everything from the remote.
    pub(crate) async fn reconcile(&self) {
        if let Err(e) = self.load().await {
            tracing::warn!(error = %e, "reconciliation load failed");
        }
    }
}
