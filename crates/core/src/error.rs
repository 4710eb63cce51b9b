// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types reported by the gate itself
//!
//! Errors produced by a visiting operation are never wrapped in these; they
//! pass through `Participant::visit` untouched.

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Outcomes the gate reports instead of a normal result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GateError {
    /// A lockdown's drain wait was cancelled; the lockdown itself still holds.
    #[error("fortress lockdown aborted")]
    Aborted,
    /// The gate has been terminated and will never admit work again.
    #[error("fortress worker shutting down")]
    Shutdown,
    /// The caller cancelled a visit before it was admitted. This is the
    /// caller's own cancellation, so [`is_gate_error`] does not count it.
    #[error("context canceled")]
    Cancelled,
}

impl GateError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, GateError::Aborted)
    }

    pub fn is_shutdown(&self) -> bool {
        matches!(self, GateError::Shutdown)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, GateError::Cancelled)
    }
}

/// Check whether an error is the gate telling the caller something
/// (aborted or shutdown) rather than an operation failing
///
/// Walks the `source()` chain, so a `GateError` wrapped by a caller's own
/// error type is still recognised. The wrapper has to expose it as a source:
/// `#[error("...")] Gate(#[from] GateError)` does, but `#[error(transparent)]`
/// forwards `source()` past the `GateError` and hides it from this check.
pub fn is_gate_error(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(gate_err) = err.downcast_ref::<GateError>() {
            return matches!(gate_err, GateError::Aborted | GateError::Shutdown);
        }
        current = err.source();
    }
    false
}

/// Errors loading a gate configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML syntax error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value in {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
