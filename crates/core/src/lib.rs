// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sw-core: Shared primitives for the stepwise execution core
//!
//! Cancellation, bounded retry, time, and identifier types used by the
//! result cache and the step executor.

pub mod macros;

pub mod cancel;
pub mod clock;
pub mod error;
pub mod id;
pub mod retry;
pub mod serde_ms;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[doc(hidden)]
pub use nanoid;
#[doc(hidden)]
pub use smol_str;

pub use cancel::CancelSignal;
pub use clock::{as_millis, Clock, FakeClock, SystemClock};
pub use error::StepError;
pub use id::{short, OwnerId, StepId};
pub use retry::{with_retries, RetryConfig, DEFAULT_MAX_RETRIES};
