//! In-process [`RemoteRecordService`] for tests.
//!
//! Records live in a `Vec` behind a mutex. Tests can queue failures per
//! operation, count calls, and hold the next call of an operation in flight
//! with a [`Latch`] to observe state before the "network" answers. A reply
//! latch holds the answer instead, after the call has already taken effect.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Semaphore;
use zf_core::entities::{NewTask, Task};
use zf_core::enums::{Quadrant, TaskStatus};

use crate::error::RemoteError;
use crate::{RemoteRecordService, TaskPatch};

/// Operation kinds of the record service contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordOp {
    List,
    Insert,
    Update,
    Delete,
}

/// Holds one call in flight until released.
#[derive(Debug)]
pub struct Latch {
    reached: Semaphore,
    release: Semaphore,
}

impl Latch {
    fn new() -> Self {
        Self {
            reached: Semaphore::new(0),
            release: Semaphore::new(0),
        }
    }

    /// Wait until the held call has arrived at the service.
    pub async fn reached(&self) {
        if let Ok(permit) = self.reached.acquire().await {
            permit.forget();
        }
    }

    /// Let the held call proceed.
    pub fn release(&self) {
        self.release.add_permits(1);
    }

    async fn hold(&self) {
        self.reached.add_permits(1);
        if let Ok(permit) = self.release.acquire().await {
            permit.forget();
        }
    }
}

#[derive(Default)]
struct MemoryState {
    records: Vec<Task>,
    next_id: u64,
    last_created: Option<DateTime<Utc>>,
    faults: HashMap<RecordOp, VecDeque<RemoteError>>,
    calls: HashMap<RecordOp, usize>,
    latches: HashMap<RecordOp, Arc<Latch>>,
    reply_latches: HashMap<RecordOp, Arc<Latch>>,
}

impl MemoryState {
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_created {
            if now <= last {
                now = last + TimeDelta::milliseconds(1);
            }
        }
        self.last_created = Some(now);
        now
    }

    fn create(&mut self, new: &NewTask) -> Task {
        self.next_id += 1;
        let task = Task {
            id: format!("mem-{:08x}", self.next_id),
            title: new.title.clone(),
            description: new.description.clone(),
            quadrant: new.quadrant,
            status: new.status,
            created_at: self.next_created_at(),
        };
        self.records.push(task.clone());
        task
    }
}

/// Record service that keeps everything in memory.
#[derive(Default)]
pub struct MemoryRecordService {
    state: Mutex<MemoryState>,
}

impl MemoryRecordService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a record directly, bypassing call counting and faults.
    pub fn seed(&self, title: &str, quadrant: Quadrant, status: TaskStatus) -> Task {
        self.state().create(&NewTask {
            title: title.to_string(),
            description: None,
            quadrant,
            status,
        })
    }

    /// Change a stored record directly, as another writer would.
    pub fn set_status(&self, id: &str, status: TaskStatus) {
        if let Some(task) = self.state().records.iter_mut().find(|t| t.id == id) {
            task.status = status;
        }
    }

    /// Make the next call of `op` fail with `error`. Faults queue up in order.
    pub fn fail_next(&self, op: RecordOp, error: RemoteError) {
        self.state().faults.entry(op).or_default().push_back(error);
    }

    /// Hold the next call of `op` until the returned latch is released.
    pub fn hold_next(&self, op: RecordOp) -> Arc<Latch> {
        let latch = Arc::new(Latch::new());
        self.state().latches.insert(op, Arc::clone(&latch));
        latch
    }

    /// Apply the next call of `op`, then hold its reply until released.
    pub fn hold_next_reply(&self, op: RecordOp) -> Arc<Latch> {
        let latch = Arc::new(Latch::new());
        self.state().reply_latches.insert(op, Arc::clone(&latch));
        latch
    }

    /// Number of calls made to `op` so far.
    pub fn calls(&self, op: RecordOp) -> usize {
        self.state().calls.get(&op).copied().unwrap_or(0)
    }

    /// Number of calls across all operations.
    pub fn total_calls(&self) -> usize {
        self.state().calls.values().sum()
    }

    /// Stored records, newest first.
    pub fn records(&self) -> Vec<Task> {
        let mut records = self.state().records.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Count the call, wait on a held latch, then surface a queued fault.
    async fn enter(&self, op: RecordOp) -> Result<(), RemoteError> {
        let latch = {
            let mut state = self.state();
            *state.calls.entry(op).or_default() += 1;
            state.latches.remove(&op)
        };
        if let Some(latch) = latch {
            latch.hold().await;
        }
        let fault = self.state().faults.get_mut(&op).and_then(VecDeque::pop_front);
        fault.map_or(Ok(()), Err)
    }

    /// Wait on a held reply for `op`, if any.
    async fn reply(&self, op: RecordOp) {
        let latch = self.state().reply_latches.remove(&op);
        if let Some(latch) = latch {
            latch.hold().await;
        }
    }
}

#[async_trait]
impl RemoteRecordService for MemoryRecordService {
    async fn list(&self) -> Result<Vec<Task>, RemoteError> {
        self.enter(RecordOp::List).await?;
        let records = self.records();
        self.reply(RecordOp::List).await;
        Ok(records)
    }

    async fn insert(&self, task: &NewTask) -> Result<Task, RemoteError> {
        self.enter(RecordOp::Insert).await?;
        let created = self.state().create(task);
        self.reply(RecordOp::Insert).await;
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<(), RemoteError> {
        self.enter(RecordOp::Update).await?;
        let result = {
            let mut state = self.state();
            state
                .records
                .iter_mut()
                .find(|t| t.id == id)
                .map(|task| patch.apply_to(task))
                .ok_or_else(|| RemoteError::NotFound { id: id.to_string() })
        };
        self.reply(RecordOp::Update).await;
        result
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.enter(RecordOp::Delete).await?;
        let removed = {
            let mut state = self.state();
            let before = state.records.len();
            state.records.retain(|t| t.id != id);
            state.records.len() < before
        };
        self.reply(RecordOp::Delete).await;
        if removed {
            Ok(())
        } else {
            Err(RemoteError::NotFound { id: id.to_string() })
        }
    }
}
