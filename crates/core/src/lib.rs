// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fortress-core: a gate that lets a controller take exclusive access
//! away from ordinary workers without stopping them
//!
//! This crate provides:
//! - [`Gate`] - mode and in-flight visit bookkeeping behind one mutex
//! - [`Controller`] - opens the gate, or locks it down and drains visits
//! - [`Participant`] - runs operations only while the gate is open
//! - [`GateError`] and [`is_gate_error`] - telling gate outcomes apart from
//!   operation failures

pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod participant;


pub use config::GateConfig;
pub use controller::Controller;
pub use error::{is_gate_error, ConfigError, GateError};
pub use gate::{Gate, GateStatus, Mode};
pub use participant::Participant;
