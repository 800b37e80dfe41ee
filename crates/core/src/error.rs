// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step failure type shared by the retry policy and the executor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure produced by a step's action or by its result validator.
///
/// Cloneable so the same failure can be recorded in the execution context,
/// handed to the error observer, and returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepError {
    /// The action itself failed.
    #[error("{message}")]
    Failed { message: String },
    /// The action succeeded but its result was rejected by the step's validator.
    #[error("result of step {step} failed validation")]
    Validation { step: String },
}

impl StepError {
    /// Build an execution failure from anything displayable.
    pub fn msg(message: impl std::fmt::Display) -> Self {
        StepError::Failed { message: message.to_string() }
    }

    pub fn validation(step: impl Into<String>) -> Self {
        StepError::Validation { step: step.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StepError::Validation { .. })
    }
}

impl From<String> for StepError {
    fn from(message: String) -> Self {
        StepError::Failed { message }
    }
}

impl From<&str> for StepError {
    fn from(message: &str) -> Self {
        StepError::msg(message)
    }
}

impl From<serde_json::Error> for StepError {
    fn from(e: serde_json::Error) -> Self {
        StepError::msg(e)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
