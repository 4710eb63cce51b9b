// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller facade: the only handle that can lock a gate down or reopen it

use crate::error::GateError;
use crate::gate::Gate;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Opens and closes a gate on behalf of whoever needs exclusive access
#[derive(Clone, Debug)]
pub struct Controller {
    gate: Arc<Gate>,
}

impl Controller {
    pub fn new(gate: Arc<Gate>) -> Self {
        Self { gate }
    }

    /// Let participants back in. Opening an open gate is a no-op.
    pub fn open(&self) -> Result<(), GateError> {
        self.gate.request_open()
    }

    /// Block new visits and wait for running ones to finish
    ///
    /// `Ok` always means the gate is closed with no visit running. Closing an
    /// already-closed gate therefore still waits for visits left running by an
    /// earlier aborted close; with nothing running it returns at once.
    ///
    /// Returns [`GateError::Aborted`] when `cancel` fires before the drain
    /// completes. The gate is still closed then; only the wait was
    /// interrupted, and retrying is left to the caller. It is also `Aborted`
    /// when another [`Controller::open`] reopens the gate while this call is
    /// draining, since the lockdown it was waiting on no longer holds.
    pub async fn close(&self, cancel: &CancellationToken) -> Result<(), GateError> {
        self.gate.request_close(cancel).await
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
