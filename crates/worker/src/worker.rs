// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker contract shared with the supervision framework

use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

/// Errors a worker reports when it stops or fails to start
#[derive(Clone, Debug, Error)]
pub enum WorkerError {
    /// A fatal error reported by work running through the worker
    #[error("worker failed: {0}")]
    Failed(Arc<dyn std::error::Error + Send + Sync>),

    #[error("worker must be started inside a tokio runtime")]
    NoRuntime,
}

impl WorkerError {
    pub fn failed(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        WorkerError::Failed(Arc::new(err))
    }
}

/// A long-running background worker
#[async_trait]
pub trait Worker: Send + Sync + 'static {
    /// Ask the worker to stop. Safe to call more than once.
    fn kill(&self);

    /// Wait for the worker to stop and return the reason, if it failed
    async fn wait(&self) -> Result<(), WorkerError>;

    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
