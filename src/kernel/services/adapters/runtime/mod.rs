//! Timer scheduler adapters: measure delays off the dispatch loop and post fires back to it.

mod async_runtime;
mod manual;

pub use async_runtime::{AsyncRuntime, TokioTimerScheduler};
pub use manual::ManualClock;
