//! Virtual clock: timers elapse only when `advance` is called.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use crate::kernel::services::bus::DispatchSender;
use crate::kernel::services::ports::{TimerFire, TimerHandle, TimerScheduler};

/// Deadline first, then scheduling order for equal deadlines.
type TimerKey = (Duration, u64);

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_seq: u64,
    timers: BTreeMap<TimerKey, TimerFire>,
}

#[derive(Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ClockState>>,
    bus: DispatchSender,
}

fn lock(state: &Mutex<ClockState>) -> MutexGuard<'_, ClockState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ManualClock {
    pub fn new(bus: DispatchSender) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClockState::default())),
            bus,
        }
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        lock(&self.state).now
    }

    pub fn pending_timers(&self) -> usize {
        lock(&self.state).timers.len()
    }

    /// Moves time forward, posting every fire that comes due in deadline order.
    ///
    /// Returns how many fires were posted.
    pub fn advance(&self, by: Duration) -> usize {
        let mut posted = 0;
        let mut state = lock(&self.state);
        let target = state.now + by;

        loop {
            let due = match state.timers.first_key_value() {
                Some((key, _)) if key.0 <= target => *key,
                _ => break,
            };
            let Some(fire) = state.timers.remove(&due) else {
                break;
            };
            state.now = due.0;
            if self.bus.send_fire(fire).is_err() {
                tracing::warn!(owner = ?fire.owner, "dispatch bus closed; timer fire lost");
            } else {
                posted += 1;
            }
        }

        state.now = target;
        posted
    }
}

impl TimerScheduler for ManualClock {
    fn schedule(&self, delay: Duration, fire: TimerFire) -> TimerHandle {
        let key = {
            let mut state = lock(&self.state);
            let key = (state.now + delay, state.next_seq);
            state.next_seq += 1;
            state.timers.insert(key, fire);
            key
        };

        let state: Weak<Mutex<ClockState>> = Arc::downgrade(&self.state);
        TimerHandle::new(move || {
            if let Some(state) = state.upgrade() {
                lock(&state).timers.remove(&key);
            }
        })
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/manual.rs"]
mod tests;
