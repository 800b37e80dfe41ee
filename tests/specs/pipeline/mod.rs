//! Step pipeline specs

mod cached;
mod cancellation;
mod failures;
mod retries;
