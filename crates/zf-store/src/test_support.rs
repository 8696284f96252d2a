//! Shared test utilities for zf-store tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::sync::Arc;

    use zf_remote::memory::MemoryRecordService;

    use crate::TaskStore;

    /// Create an empty store over an in-memory record service.
    pub fn memory_store() -> (TaskStore, Arc<MemoryRecordService>) {
        let remote = Arc::new(MemoryRecordService::new());
        (TaskStore::new(Arc::clone(&remote) as _), remote)
    }

    /// Seed the record service, then load the store from it.
    pub async fn loaded_store<F>(seed: F) -> (TaskStore, Arc<MemoryRecordService>)
    where
        F: FnOnce(&MemoryRecordService),
    {
        let (store, remote) = memory_store();
        seed(&remote);
        store.load().await.unwrap();
        (store, remote)
    }
}
