use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::kernel::services::bus::DispatchSender;
use crate::kernel::services::ports::{TimerFire, TimerHandle, TimerScheduler};

/// Owns the tokio runtime whose worker threads measure behavior delays.
pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
}

impl AsyncRuntime {
    pub fn new() -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("gesturegate-timer")
            .enable_time()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
            })?;
        Ok(Self { runtime })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn scheduler(&self, bus: DispatchSender) -> Arc<TokioTimerScheduler> {
        Arc::new(TokioTimerScheduler {
            handle: self.tokio_handle(),
            bus,
        })
    }
}

/// Sleeps on the tokio runtime, then posts the fire back to the dispatch bus.
pub struct TokioTimerScheduler {
    handle: tokio::runtime::Handle,
    bus: DispatchSender,
}

impl TimerScheduler for TokioTimerScheduler {
    fn schedule(&self, delay: Duration, fire: TimerFire) -> TimerHandle {
        let bus = self.bus.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if bus.send_fire(fire).is_err() {
                tracing::debug!(owner = ?fire.owner, "dispatch bus closed before timer fired");
            }
        });
        let abort = task.abort_handle();
        TimerHandle::new(move || abort.abort())
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
