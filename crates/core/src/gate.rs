// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gate state machine for exclusive maintenance access
//!
//! A gate separates a controller, which can demand exclusive access, from any
//! number of participants, which run short operations only while the gate is
//! open. All mode and counter mutations happen under one mutex; waiters are
//! released by a broadcast `Notify` and by a one-shot shutdown token.
//!
//! Lockdown is two distinct steps: [`Gate::lock_down`] flips the mode
//! immediately and irrevocably, then [`Gate::drain`] waits for in-flight
//! visits to finish. Cancelling the drain never undoes the flip.

use crate::config::GateConfig;
use crate::controller::Controller;
use crate::error::GateError;
use crate::participant::Participant;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Gate mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Visits are admitted
    Open,
    /// Lockdown: new visits wait until the gate reopens
    Closed,
    /// Permanently shut down
    Terminated,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Mode::Open => "open",
            Mode::Closed => "closed",
            Mode::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Point-in-time view of a gate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateStatus {
    pub name: String,
    pub mode: Mode,
    /// Visits currently running
    pub active: usize,
}

#[derive(Debug)]
struct GateState {
    mode: Mode,
    active: usize,
}

/// Shared state behind a controller and its participants
#[derive(Debug)]
pub struct Gate {
    config: GateConfig,
    state: Mutex<GateState>,
    /// Woken on every mode change and whenever the last visit leaves
    changed: Notify,
    shutdown: CancellationToken,
}

impl Gate {
    /// Create a gate in lockdown
    pub fn new(config: GateConfig) -> Self {
        Self {
            config,
            state: Mutex::new(GateState {
                mode: Mode::Closed,
                active: 0,
            }),
            changed: Notify::new(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Controller facade over this gate
    pub fn controller(self: &Arc<Self>) -> Controller {
        Controller::new(Arc::clone(self))
    }

    /// Participant facade over this gate
    pub fn participant(self: &Arc<Self>) -> Participant {
        Participant::new(Arc::clone(self))
    }

    pub fn status(&self) -> GateStatus {
        let state = self.lock_state();
        GateStatus {
            name: self.config.name.clone(),
            mode: state.mode,
            active: state.active,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.lock_state().mode == Mode::Terminated
    }

    /// Admit visits. Never waits.
    pub fn request_open(&self) -> Result<(), GateError> {
        let mut state = self.lock_state();
        match state.mode {
            Mode::Terminated => Err(GateError::Shutdown),
            Mode::Open => Ok(()),
            Mode::Closed => {
                state.mode = Mode::Open;
                drop(state);
                self.log_transition(Mode::Closed, Mode::Open);
                self.changed.notify_waiters();
                Ok(())
            }
        }
    }

    /// Lock the gate down and wait for running visits to finish
    ///
    /// See [`Controller::close`] for the outcomes. An already-closed gate is
    /// drained again rather than returning straight away.
    pub async fn request_close(&self, cancel: &CancellationToken) -> Result<(), GateError> {
        self.lock_down()?;
        self.drain(cancel).await
    }

    /// Flip to `Closed`. Every visit that checks the mode after this returns
    /// sees the lockdown.
    pub fn lock_down(&self) -> Result<(), GateError> {
        let mut state = self.lock_state();
        match state.mode {
            Mode::Terminated => Err(GateError::Shutdown),
            Mode::Closed => Ok(()),
            Mode::Open => {
                state.mode = Mode::Closed;
                drop(state);
                self.log_transition(Mode::Open, Mode::Closed);
                self.changed.notify_waiters();
                Ok(())
            }
        }
    }

    /// Wait until no visits are running
    pub async fn drain(&self, cancel: &CancellationToken) -> Result<(), GateError> {
        let warn_at = Instant::now().checked_add(self.config.drain_warning);
        let mut warned = warn_at.is_none();
        let mut logged_start = false;

        loop {
            // Register before checking state so a release between the check
            // and the await still wakes us.
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let state = self.lock_state();
                match state.mode {
                    Mode::Terminated => return Err(GateError::Shutdown),
                    // Reopened underneath us; this lockdown no longer holds.
                    Mode::Open => return Err(GateError::Aborted),
                    Mode::Closed if state.active == 0 => {
                        if logged_start {
                            tracing::debug!(gate = %self.config.name, "gate drained");
                        }
                        return Ok(());
                    }
                    Mode::Closed => {
                        if !logged_start {
                            logged_start = true;
                            tracing::debug!(
                                gate = %self.config.name,
                                active = state.active,
                                "waiting for visits to drain"
                            );
                        }
                    }
                }
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return Err(GateError::Shutdown),
                _ = cancel.cancelled() => {
                    tracing::debug!(gate = %self.config.name, "drain aborted");
                    return Err(GateError::Aborted);
                }
                _ = &mut notified => {}
                _ = tokio::time::sleep_until(warn_at.unwrap_or_else(Instant::now)), if !warned => {
                    warned = true;
                    tracing::warn!(
                        gate = %self.config.name,
                        active = self.lock_state().active,
                        threshold = ?self.config.drain_warning,
                        "lockdown still waiting for visits to finish"
                    );
                }
            }
        }
    }

    /// Shut the gate down for good, releasing every waiter
    ///
    /// Returns true only for the call that performed the termination.
    pub fn terminate(&self) -> bool {
        let mut state = self.lock_state();
        let from = state.mode;
        if from == Mode::Terminated {
            return false;
        }
        state.mode = Mode::Terminated;
        drop(state);

        self.log_transition(from, Mode::Terminated);
        self.shutdown.cancel();
        self.changed.notify_waiters();
        true
    }

    /// Run `operation` once the gate is open
    ///
    /// The operation's own result is returned untouched. Gate outcomes are
    /// converted into `E`: shutdown, or [`GateError::Cancelled`] when `cancel`
    /// fires before admission.
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
        let _ticket = self.admit(cancel).await?;
        operation().await
    }

    async fn admit(&self, cancel: &CancellationToken) -> Result<VisitTicket<'_>, GateError> {
        loop {
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock_state();
                match state.mode {
                    Mode::Terminated => return Err(GateError::Shutdown),
                    Mode::Open => {
                        state.active += 1;
                        return Ok(VisitTicket { gate: self });
                    }
                    Mode::Closed => {}
                }
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return Err(GateError::Shutdown),
                _ = cancel.cancelled() => return Err(GateError::Cancelled),
                _ = &mut notified => {}
            }
        }
    }

    fn release(&self) {
        let mut state = self.lock_state();
        state.active = state.active.saturating_sub(1);
        let drained = state.active == 0;
        drop(state);

        if drained {
            self.changed.notify_waiters();
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn log_transition(&self, from: Mode, to: Mode) {
        tracing::debug!(gate = %self.config.name, %from, %to, "gate mode changed");
    }
}

/// Counts one running visit; released on drop, including unwind and
/// cancellation of the visiting future.
struct VisitTicket<'a> {
    gate: &'a Gate,
}

impl Drop for VisitTicket<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
