// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step definitions.
//!
//! A step is immutable once built. The executor borrows it for the length
//! of a run and never clones its action.

use crate::context::ExecutionContext;
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use sw_core::{RetryConfig, StepError, StepId};

/// The work a step performs.
///
/// Implementations that run for a long time should watch
/// `ctx.signal()` themselves; the executor only checks for cancellation
/// between steps.
#[async_trait]
pub trait StepAction: Send + Sync {
    async fn execute(&self, ctx: &ExecutionContext) -> Result<Value, StepError>;
}

/// Adapts a closure returning a boxed future into a [`StepAction`].
pub struct FnAction<F> {
    f: F,
}

impl<F> FnAction<F>
where
    F: for<'a> Fn(&'a ExecutionContext) -> BoxFuture<'a, Result<Value, StepError>> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> StepAction for FnAction<F>
where
    F: for<'a> Fn(&'a ExecutionContext) -> BoxFuture<'a, Result<Value, StepError>> + Send + Sync,
{
    async fn execute(&self, ctx: &ExecutionContext) -> Result<Value, StepError> {
        (self.f)(ctx).await
    }
}

/// Predicate applied once to each successful result.
pub type Validator = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A named unit of work in a pipeline.
#[derive(Clone)]
pub struct Step {
    pub id: StepId,
    pub name: String,
    /// A failed required step aborts the run; an optional one is recorded and skipped.
    pub required: bool,
    /// Per-step retry policy; the executor's default applies when unset.
    pub retry: Option<RetryConfig>,
    validator: Option<Validator>,
    action: Option<Arc<dyn StepAction>>,
}

impl Step {
    /// A required step with no action yet. Running it without attaching
    /// one is a structural error.
    pub fn new(id: impl Into<StepId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            required: true,
            retry: None,
            validator: None,
            action: None,
        }
    }

    sw_core::setters! {
        into { name: String }
        set { required: bool }
        option { retry: RetryConfig }
    }

    pub fn optional(self) -> Self {
        self.required(false)
    }

    pub fn action(mut self, action: impl StepAction + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// Use a closure as the action.
    ///
    /// ```ignore
    /// Step::new("double", "Double").execute_fn(|ctx| {
    ///     Box::pin(async move { Ok(json!(ctx.result("base").cloned())) })
    /// })
    /// ```
    pub fn execute_fn<F>(self, f: F) -> Self
    where
        F: for<'a> Fn(&'a ExecutionContext) -> BoxFuture<'a, Result<Value, StepError>>
            + Send
            + Sync
            + 'static,
    {
        self.action(FnAction::new(f))
    }

    pub fn validator(mut self, f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.validator = Some(Arc::new(f));
        self
    }

    pub fn callable(&self) -> Option<&dyn StepAction> {
        self.action.as_deref()
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    /// Run the validator against `value`; steps without one accept everything.
    pub fn validate(&self, value: &Value) -> bool {
        self.validator.as_ref().map_or(true, |f| f(value))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("required", &self.required)
            .field("retry", &self.retry)
            .field("validator", &self.validator.is_some())
            .field("action", &self.action.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
