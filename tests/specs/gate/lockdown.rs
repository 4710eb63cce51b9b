//! Lockdown specs
//!
//! Verify draining, aborted lockdowns and repeated transitions.

use crate::prelude::*;

#[tokio::test]
async fn double_unlock() {
    let fix = Fixture::new();
    let guard = fix.controller();

    guard.open().unwrap();
    guard.open().unwrap();

    assert_unlocked(&fix.participant()).await;
    fix.tear_down().await;
}

#[tokio::test]
async fn double_lockdown() {
    let fix = Fixture::new();
    let guard = fix.controller();
    let cancel = CancellationToken::new();

    guard.open().unwrap();
    guard.close(&cancel).await.unwrap();
    guard.close(&cancel).await.unwrap();

    assert_locked(&fix.participant()).await;
    fix.tear_down().await;
}

#[tokio::test]
async fn visit_holds_lockdown() {
    let fix = Fixture::new();
    let visit = start_blocking_visit(&fix).await;

    let guard = fix.controller();
    let locked = tokio::spawn(async move {
        let cancel = CancellationToken::new();
        guard.close(&cancel).await
    });
    tokio::time::sleep(SHORT_WAIT).await;
    assert!(!locked.is_finished(), "lockdown returned during a visit");

    // ...including new visits
    assert_locked(&fix.participant()).await;

    visit.finish().await;
    let result = timeout(LONG_WAIT, locked).await.unwrap().unwrap();
    assert_eq!(result, Ok(()));
    fix.tear_down().await;
}

#[tokio::test]
async fn aborted_lockdown_still_locks() {
    let fix = Fixture::new();
    let visit = start_blocking_visit(&fix).await;

    let cancel = CancellationToken::new();
    let guard = fix.controller();
    let lockdown_cancel = cancel.clone();
    let locked = tokio::spawn(async move { guard.close(&lockdown_cancel).await });
    tokio::time::sleep(SHORT_WAIT).await;
    assert!(!locked.is_finished());

    cancel.cancel();
    let result = timeout(LONG_WAIT, locked).await.unwrap().unwrap();
    assert_eq!(result, Err(GateError::Aborted));

    // Locked already, even as the old visit continues
    assert_locked(&fix.participant()).await;

    visit.finish().await;
    fix.tear_down().await;
}

#[tokio::test]
async fn aborted_lockdown_then_unlock() {
    let fix = Fixture::new();
    let visit = start_blocking_visit(&fix).await;
    let guard = fix.controller();

    let cancel = CancellationToken::new();
    cancel.cancel();
    assert_eq!(guard.close(&cancel).await, Err(GateError::Aborted));

    // Unlock again with the original visit still running
    guard.open().unwrap();
    assert_unlocked(&fix.participant()).await;

    visit.finish().await;
    fix.tear_down().await;
}
