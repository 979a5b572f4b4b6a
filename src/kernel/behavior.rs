use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use slotmap::new_key_type;

use crate::core::InputEvent;

use super::services::ports::{TimerFire, TimerHandle, TimerScheduler};

new_key_type! { pub struct BehaviorId; }

/// A behavior's private line to the timer scheduler.
///
/// Every fire started through it is addressed back to the owning behavior.
#[derive(Clone)]
pub struct TimerContext {
    owner: BehaviorId,
    scheduler: Arc<dyn TimerScheduler>,
}

impl TimerContext {
    pub fn new(owner: BehaviorId, scheduler: Arc<dyn TimerScheduler>) -> Self {
        Self { owner, scheduler }
    }

    pub fn owner(&self) -> BehaviorId {
        self.owner
    }

    pub fn start(&self, delay: Duration, generation: u64) -> TimerHandle {
        self.scheduler.schedule(
            delay,
            TimerFire {
                owner: self.owner,
                generation,
            },
        )
    }
}

impl fmt::Debug for TimerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerContext")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

/// An attached behavior as seen by the dispatch loop.
///
/// All methods run on the dispatch thread, one at a time.
pub trait Behavior: Any {
    fn name(&self) -> &'static str;

    fn on_event(&mut self, event: &InputEvent);

    /// A timer started with `generation` elapsed. Stale generations must be ignored.
    fn on_timer(&mut self, generation: u64);

    /// Cancels pending work. Called once by the host on detach, but must tolerate repeats.
    fn detach(&mut self);

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Behavior {
    pub fn downcast_mut<T: Behavior>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
