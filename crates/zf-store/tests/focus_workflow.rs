//! End-to-end board workflow through the public `TaskStore` API.
//!
//! Runs against the in-memory record service so failures can be injected at
//! precise points.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use zf_core::enums::{Quadrant, TaskStatus};
use zf_remote::RemoteError;
use zf_remote::memory::{MemoryRecordService, RecordOp};
use zf_store::{MutationOutcome, StoreError, TaskStore};

fn store() -> (TaskStore, Arc<MemoryRecordService>) {
    let remote = Arc::new(MemoryRecordService::new());
    (TaskStore::new(Arc::clone(&remote) as _), remote)
}

#[tokio::test]
async fn triage_focus_and_finish() {
    let (store, remote) = store();
    store.load().await.unwrap();

    let report = store
        .create("Quarterly report", Some("Due Monday"), Quadrant::Q1)
        .await
        .unwrap();
    let gym = store.create("Book gym class", None, Quadrant::Q2).await.unwrap();
    store.create("Reply to newsletter", None, Quadrant::Q3).await.unwrap();

    assert_eq!(store.backlog_tasks().len(), 3);
    assert_eq!(store.backlog_by_quadrant(Quadrant::Q1), vec![report.clone()]);

    store.move_to_basket(&report.id).await.unwrap();
    assert!(matches!(
        store.move_to_basket(&gym.id).await,
        Err(StoreError::FocusOccupied { .. })
    ));

    let board = store.board();
    assert_eq!(board.active.as_ref().map(|t| t.id.as_str()), Some(report.id.as_str()));
    assert!(board.quadrants[0].tasks.is_empty(), "focused task leaves the matrix");

    assert_eq!(
        store.complete(&report.id).await.unwrap(),
        MutationOutcome::Confirmed
    );
    store.move_to_basket(&gym.id).await.unwrap();

    assert_eq!(store.completed_count(), 1);
    assert_eq!(store.active_task().map(|t| t.id), Some(gym.id));
    assert_eq!(store.tasks(), remote.records());
}

#[tokio::test]
async fn flaky_network_never_leaves_two_tasks_in_focus() {
    let (store, remote) = store();
    let a = remote.seed("A", Quadrant::Q1, TaskStatus::Backlog);
    let b = remote.seed("B", Quadrant::Q2, TaskStatus::Backlog);
    store.load().await.unwrap();

    remote.fail_next(RecordOp::Update, RemoteError::Connection("reset".into()));
    let outcome = store.move_to_basket(&a.id).await.unwrap();
    assert!(!outcome.is_confirmed());
    assert!(!store.has_active_task(), "failed focus is rolled back by reload");

    store.move_to_basket(&b.id).await.unwrap();
    assert!(store.move_to_basket(&a.id).await.is_err());

    let in_basket = remote
        .records()
        .iter()
        .filter(|t| t.status == TaskStatus::Basket)
        .count();
    assert_eq!(in_basket, 1);
    assert!(store.check_invariants().is_ok());
}

#[tokio::test]
async fn initial_load_error_is_persistent_until_retry() {
    let (store, remote) = store();
    remote.seed("Waiting", Quadrant::Q4, TaskStatus::Backlog);
    remote.fail_next(
        RecordOp::List,
        RemoteError::Parse("expected value at line 1 column 1".into()),
    );

    assert!(store.load().await.is_err());
    assert!(matches!(store.load_error(), Some(RemoteError::Parse(_))));
    assert!(store.load_error().is_some(), "error does not clear by itself");
    assert!(store.tasks().is_empty());

    store.retry().await.unwrap();
    assert!(store.load_error().is_none());
    assert_eq!(store.tasks().len(), 1);
}
