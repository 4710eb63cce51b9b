// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Participant facade: runs ordinary operations through a gate

use crate::error::GateError;
use crate::gate::Gate;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Handle for ordinary work that must never overlap a lockdown
#[derive(Clone, Debug)]
pub struct Participant {
    gate: Arc<Gate>,
}

impl Participant {
    pub fn new(gate: Arc<Gate>) -> Self {
        Self { gate }
    }

    /// Run `operation` exactly once while the gate is open
    ///
    /// Waits while the gate is closed. Returns the operation's result as-is;
    /// if the operation never runs, returns the gate's reason converted into
    /// `E` (shutdown, or cancellation by `cancel`).
    pub async fn visit<F, Fut, T, E>(
        &self,
        cancel: &CancellationToken,
        operation: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<GateError>,
    {
        self.gate.visit(cancel, operation).await
    }
}

#[cfg(test)]
#[path = "participant_tests.rs"]
mod tests;
