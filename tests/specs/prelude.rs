//! Shared fixture and assertions for gate specs

pub use fortress_core::{is_gate_error, Controller, GateConfig, GateError, Participant};
pub use fortress_worker::{GateManifold, Worker};
pub use std::time::Duration;
pub use tokio::time::timeout;
pub use tokio_util::sync::CancellationToken;

use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const SHORT_WAIT: Duration = Duration::from_millis(50);
pub const LONG_WAIT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq)]
pub enum VisitError {
    #[error("{0}")]
    Gate(#[from] GateError),
    #[error("bad!")]
    Bad,
}

pub async fn bad_visit() -> Result<(), VisitError> {
    Err(VisitError::Bad)
}

/// A manifold and one worker started from it
pub struct Fixture {
    pub manifold: GateManifold,
    pub worker: Box<dyn Worker>,
}

impl Fixture {
    pub fn new() -> Self {
        let manifold = GateManifold::new(GateConfig::new("specs"));
        let worker = manifold.start().unwrap();
        Self { manifold, worker }
    }

    pub fn controller(&self) -> Controller {
        self.manifold.controller(self.worker.as_ref()).unwrap()
    }

    pub fn participant(&self) -> Participant {
        self.manifold.participant(self.worker.as_ref()).unwrap()
    }

    /// Stop the worker and check it stopped cleanly
    pub async fn tear_down(&self) {
        self.worker.kill();
        timeout(LONG_WAIT, self.worker.wait())
            .await
            .expect("worker did not stop")
            .expect("worker stopped with an error");
    }
}

pub async fn assert_locked(participant: &Participant) {
    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(SHORT_WAIT).await;
        canceller.cancel();
    });

    let ran = AtomicBool::new(false);
    let flag = &ran;
    let result = timeout(
        LONG_WAIT,
        participant.visit(&cancel, move || async move {
            flag.store(true, Ordering::SeqCst);
            Ok::<(), VisitError>(())
        }),
    )
    .await
    .expect("cancelled visit did not return");

    assert_eq!(result, Err(VisitError::Gate(GateError::Cancelled)));
    assert!(!ran.load(Ordering::SeqCst), "visited a locked gate");
}

pub async fn assert_unlocked(participant: &Participant) {
    let cancel = CancellationToken::new();
    let result = timeout(
        LONG_WAIT,
        participant.visit(&cancel, || async { Ok::<(), VisitError>(()) }),
    )
    .await
    .expect("visit to an unlocked gate timed out");
    assert_eq!(result, Ok(()));
}

/// A visit that keeps running until released or dropped
pub struct BlockingVisit {
    release: Option<oneshot::Sender<()>>,
    handle: JoinHandle<Result<(), VisitError>>,
}

impl BlockingVisit {
    pub async fn finish(mut self) {
        if let Some(release) = self.release.take() {
            let _ = release.send(());
        }
        let result = timeout(LONG_WAIT, &mut self.handle)
            .await
            .expect("blocking visit did not finish")
            .expect("blocking visit panicked");
        assert_eq!(result, Ok(()));
    }
}

/// Unlock the gate and start a visit that stays inside until finished
pub async fn start_blocking_visit(fix: &Fixture) -> BlockingVisit {
    fix.controller().open().unwrap();

    let (started_tx, started_rx) = oneshot::channel();
    let (release_tx, release_rx) = oneshot::channel::<()>();
    let participant = fix.participant();
    let handle = tokio::spawn(async move {
        let cancel = CancellationToken::new();
        participant
            .visit(&cancel, move || async move {
                let _ = started_tx.send(());
                let _ = release_rx.await;
                Ok(())
            })
            .await
    });

    timeout(LONG_WAIT, started_rx)
        .await
        .expect("blocking visit never started")
        .expect("blocking visit dropped before starting");

    BlockingVisit {
        release: Some(release_tx),
        handle,
    }
}
