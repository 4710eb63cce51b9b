// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fortress-worker: runs a gate as a supervised worker
//!
//! The worker owns one gate for its whole life and terminates it when it
//! stops. The manifold builds those workers and hands out the controller or
//! participant facade to whoever asks for one.

mod gate_worker;
mod manifold;
mod worker;

pub use gate_worker::GateWorker;
pub use manifold::{GateManifold, ManifoldError};
pub use worker::{Worker, WorkerError};
