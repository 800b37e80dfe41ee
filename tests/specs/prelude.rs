//! Shared helpers for the specs.

pub use serde_json::{json, Value};
pub use std::sync::Arc;
pub use std::time::Duration;
pub use sw_cache::{
    cache_key, canonicalize, CacheConfig, CacheKeyInput, KeyValue, MemoryStore, ResultCache,
    CIRCULAR,
};
pub use sw_core::test_support::Recorder;
pub use sw_core::{with_retries, CancelSignal, FakeClock, OwnerId, RetryConfig, StepError};
pub use sw_engine::{
    CachedAction, Config, ExecuteError, ExecutionContext, ExecutionState, Observers, Step,
    StepAction, StepExecutor,
};

use std::sync::atomic::{AtomicU32, Ordering};

/// Route engine logs to the test writer; `RUST_LOG=debug` shows them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Executor on a fake clock that never retries unless a step asks to.
pub fn executor() -> StepExecutor<FakeClock> {
    init_tracing();
    StepExecutor::with_clock(FakeClock::new()).default_retry(RetryConfig::none())
}

/// Step action that counts its invocations and either returns a fixed
/// value or always fails.
#[derive(Clone)]
pub struct Probe {
    calls: Arc<AtomicU32>,
    outcome: Result<Value, StepError>,
}

impl Probe {
    pub fn ok(value: Value) -> Self {
        Self { calls: Arc::default(), outcome: Ok(value) }
    }

    pub fn failing(message: &str) -> Self {
        Self { calls: Arc::default(), outcome: Err(StepError::msg(message)) }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn step(&self, id: &str) -> Step {
        Step::new(id, id).action(self.clone())
    }
}

#[async_trait::async_trait]
impl StepAction for Probe {
    async fn execute(&self, _ctx: &ExecutionContext) -> Result<Value, StepError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
