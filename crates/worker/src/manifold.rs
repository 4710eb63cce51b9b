// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds gate workers and hands out their facades
//!
//! Every worker started by a manifold gets its own gate. Consumers never see
//! the gate itself, only a [`Controller`] or a [`Participant`] looked up from
//! the worker they depend on.

use crate::gate_worker::GateWorker;
use crate::worker::{Worker, WorkerError};
use fortress_core::{Controller, Gate, GateConfig, Participant};
use std::any::{type_name, Any};
use std::sync::Arc;
use thiserror::Error;

/// Usage errors from the manifold; never a gate outcome
#[derive(Debug, Error)]
pub enum ManifoldError {
    #[error("in should be {expected}; is {actual}")]
    BadSource {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("out should be {expected}; is {actual}")]
    BadTarget {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("cannot start gate worker: {0}")]
    Start(#[from] WorkerError),
}

/// Factory for gate workers
#[derive(Clone, Debug, Default)]
pub struct GateManifold {
    config: GateConfig,
}

impl GateManifold {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Start a worker around a fresh gate, initially closed
    pub fn start(&self) -> Result<Box<dyn Worker>, ManifoldError> {
        let gate = Arc::new(Gate::new(self.config.clone()));
        let worker = GateWorker::start(gate)?;
        Ok(Box::new(worker))
    }

    /// Fill `out` with the facade it asks for
    ///
    /// `out` must be an `Option<Controller>` or an `Option<Participant>`. It
    /// is left untouched on error.
    pub fn output<T: Any>(
        &self,
        worker: &dyn Worker,
        out: &mut Option<T>,
    ) -> Result<(), ManifoldError> {
        let gate_worker = worker.as_any().downcast_ref::<GateWorker>().ok_or(
            ManifoldError::BadSource {
                expected: type_name::<GateWorker>(),
                actual: worker.type_name(),
            },
        )?;

        let slot: &mut dyn Any = out;
        if let Some(slot) = slot.downcast_mut::<Option<Controller>>() {
            *slot = Some(gate_worker.controller());
            return Ok(());
        }
        if let Some(slot) = slot.downcast_mut::<Option<Participant>>() {
            *slot = Some(gate_worker.participant());
            return Ok(());
        }

        Err(ManifoldError::BadTarget {
            expected: "Option<Controller> or Option<Participant>",
            actual: type_name::<Option<T>>(),
        })
    }

    pub fn controller(&self, worker: &dyn Worker) -> Result<Controller, ManifoldError> {
        let mut out: Option<Controller> = None;
        self.output(worker, &mut out)?;
        out.ok_or(ManifoldError::BadTarget {
            expected: "Option<Controller>",
            actual: type_name::<Option<Controller>>(),
        })
    }

    pub fn participant(&self, worker: &dyn Worker) -> Result<Participant, ManifoldError> {
        let mut out: Option<Participant> = None;
        self.output(worker, &mut out)?;
        out.ok_or(ManifoldError::BadTarget {
            expected: "Option<Participant>",
            actual: type_name::<Option<Participant>>(),
        })
    }
}

#[cfg(test)]
#[path = "manifold_tests.rs"]
mod tests;
