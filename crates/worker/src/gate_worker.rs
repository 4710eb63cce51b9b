// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker that owns a gate and terminates it exactly once when it stops

use crate::worker::{Worker, WorkerError};
use async_trait::async_trait;
use fortress_core::{Controller, Gate, GateStatus, Participant};
use std::any::Any;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Keeps a gate alive for as long as the worker runs
pub struct GateWorker {
    gate: Arc<Gate>,
    kill: CancellationToken,
    stopped: CancellationToken,
    failure: Mutex<Option<WorkerError>>,
}

impl GateWorker {
    /// Start the worker on the current tokio runtime
    pub fn start(gate: Arc<Gate>) -> Result<Self, WorkerError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| WorkerError::NoRuntime)?;
        let kill = CancellationToken::new();
        let stopped = CancellationToken::new();

        tracing::info!(gate = gate.name(), "gate worker started");
        runtime.spawn(run(Arc::clone(&gate), kill.clone(), stopped.clone()));

        Ok(Self {
            gate,
            kill,
            stopped,
            failure: Mutex::new(None),
        })
    }

    pub fn controller(&self) -> Controller {
        self.gate.controller()
    }

    pub fn participant(&self) -> Participant {
        self.gate.participant()
    }

    pub fn gate_status(&self) -> GateStatus {
        self.gate.status()
    }

    /// Stop the worker because of a fatal error
    ///
    /// Only the first reported error is kept; `wait` returns it.
    pub fn fail(&self, err: WorkerError) {
        let mut failure = self.failure.lock().unwrap_or_else(|e| e.into_inner());
        if failure.is_none() {
            tracing::error!(gate = self.gate.name(), error = %err, "gate worker failed");
            *failure = Some(err);
        }
        drop(failure);
        self.kill.cancel();
    }
}

async fn run(gate: Arc<Gate>, kill: CancellationToken, stopped: CancellationToken) {
    kill.cancelled().await;
    if gate.terminate() {
        tracing::info!(gate = gate.name(), "gate worker stopped, gate terminated");
    }
    stopped.cancel();
}

#[async_trait]
impl Worker for GateWorker {
    fn kill(&self) {
        self.kill.cancel();
    }

    async fn wait(&self) -> Result<(), WorkerError> {
        self.stopped.cancelled().await;
        let failure = self.failure.lock().unwrap_or_else(|e| e.into_inner());
        match failure.as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GateWorker {
    fn drop(&mut self) {
        self.kill.cancel();
    }
}

#[cfg(test)]
#[path = "gate_worker_tests.rs"]
mod tests;
