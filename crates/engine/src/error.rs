// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executor errors

use crate::context::ExecutionState;
use sw_core::{StepError, StepId};
use thiserror::Error;

/// Errors that abort a run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    /// The step definition itself is unusable. Never retried.
    #[error("step {step} (index {index}) is malformed: {reason}")]
    Structural { index: usize, step: StepId, reason: String },
    /// A required step failed after its retries were spent.
    #[error("required step {step} failed: {source}")]
    StepFailed {
        step: StepId,
        #[source]
        source: StepError,
    },
    /// Runs only start from a fresh context.
    #[error("context is {0}, expected idle")]
    InvalidState(ExecutionState),
}

impl ExecuteError {
    /// The underlying step failure, when a required step caused the abort.
    pub fn step_error(&self) -> Option<&StepError> {
        match self {
            ExecuteError::StepFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
