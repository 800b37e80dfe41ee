// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run-scoped execution state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sw_core::{CancelSignal, StepError, StepId};

/// Lifecycle of one run.
///
/// `Idle -> Executing -> {Completed | Error | Cancelled}`. The last three
/// are terminal and no state is ever revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    #[default]
    Idle,
    Executing,
    Completed,
    Error,
    Cancelled,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionState::Completed | ExecutionState::Error | ExecutionState::Cancelled
        )
    }

    /// Whether moving from `self` to `next` follows the state machine.
    pub fn can_transition_to(&self, next: ExecutionState) -> bool {
        match self {
            ExecutionState::Idle => next == ExecutionState::Executing,
            ExecutionState::Executing => next.is_terminal(),
            _ => false,
        }
    }
}

sw_core::simple_display! {
    ExecutionState {
        Idle => "idle",
        Executing => "executing",
        Completed => "completed",
        Error => "error",
        Cancelled => "cancelled",
    }
}

/// One step attempt as seen by the run (retries of a step collapse into one entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub step_id: StepId,
    pub started_at_ms: u64,
    pub finished_at_ms: u64,
    pub success: bool,
}

/// A step failure kept in the context's error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step_id: StepId,
    pub step_name: String,
    pub error: StepError,
}

/// Mutable state of a single run.
///
/// Owned by exactly one run; concurrent runs need their own context and
/// their own signal. Steps get shared read access while they execute, so
/// a later step can read the results of earlier ones.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    state: ExecutionState,
    results: IndexMap<StepId, Value>,
    progress: u8,
    history: Vec<AttemptRecord>,
    errors: Vec<StepFailure>,
    signal: CancelSignal,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context bound to an existing signal, e.g. one a caller already holds
    /// a handle to.
    pub fn with_signal(signal: CancelSignal) -> Self {
        Self { signal, ..Self::default() }
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Results keyed by step ID, in the order steps first produced them.
    pub fn results(&self) -> &IndexMap<StepId, Value> {
        &self.results
    }

    pub fn result(&self, step_id: &str) -> Option<&Value> {
        self.results.get(step_id)
    }

    /// Percentage of steps completed, 0 to 100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    pub fn errors(&self) -> &[StepFailure] {
        &self.errors
    }

    pub fn signal(&self) -> &CancelSignal {
        &self.signal
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }

    /// Move to `next` if the state machine allows it.
    pub(crate) fn transition(&mut self, next: ExecutionState) -> bool {
        if !self.state.can_transition_to(next) {
            tracing::warn!(from = %self.state, to = %next, "ignored invalid state transition");
            return false;
        }
        self.state = next;
        true
    }

    pub(crate) fn record_result(&mut self, step_id: &StepId, value: Value) {
        self.results.insert(step_id.clone(), value);
    }

    pub(crate) fn record_attempt(&mut self, attempt: AttemptRecord) {
        self.history.push(attempt);
    }

    pub(crate) fn record_error(&mut self, failure: StepFailure) {
        self.errors.push(failure);
    }

    /// Raise progress to `percent`; never lowers it. Returns the new value.
    pub(crate) fn advance_progress(&mut self, percent: u8) -> u8 {
        self.progress = self.progress.max(percent.min(100));
        self.progress
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
