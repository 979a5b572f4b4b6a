use std::fmt;
use std::time::Duration;

use crate::kernel::behavior::BehaviorId;

/// What a timer posts back to the dispatch loop once its delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    pub owner: BehaviorId,
    pub generation: u64,
}

/// Measures delays off the dispatch loop.
///
/// Implementations must never call into behavior state; they only post the `TimerFire` to the
/// dispatch bus after `delay`. A fire that was cancelled through its handle must not be posted,
/// but receivers still tolerate late or stale fires.
pub trait TimerScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, fire: TimerFire) -> TimerHandle;
}

/// Cancels the scheduled fire on `cancel()` or drop.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}
