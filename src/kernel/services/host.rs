use std::fmt;
use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::core::{InputEvent, TargetId};
use crate::kernel::behavior::{Behavior, BehaviorId, TimerContext};

use super::adapters::{AsyncRuntime, ManualClock};
use super::bus::{dispatch_bus, DispatchMessage, DispatchReceiver, DispatchSender};
use super::ports::{TimerFire, TimerScheduler};

pub const MAX_DISPATCH_DRAIN_PER_PUMP: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    UnknownBehavior(BehaviorId),
    TypeMismatch {
        id: BehaviorId,
        actual: &'static str,
    },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::UnknownBehavior(id) => write!(f, "Behavior not attached: {:?}", id),
            HostError::TypeMismatch { id, actual } => {
                write!(f, "Behavior {:?} has a different type: {}", id, actual)
            }
        }
    }
}

impl std::error::Error for HostError {}

/// Subscription capability the dispatch loop exposes to behaviors' attach/detach wiring.
pub trait EventSource {
    fn subscribe(&mut self, target: TargetId, behavior: BehaviorId);

    /// Returns whether a subscription was removed.
    fn unsubscribe(&mut self, target: TargetId, behavior: BehaviorId) -> bool;
}

struct Attached {
    target: TargetId,
    behavior: Box<dyn Behavior>,
}

/// The dispatch loop: the only place behaviors run.
///
/// Input events are handled synchronously in `deliver`; timer fires arrive through the bus and
/// are handled in `pump`/`wait`. Everything runs on the thread that owns the dispatcher, one
/// handler at a time.
pub struct Dispatcher {
    behaviors: SlotMap<BehaviorId, Attached>,
    subscriptions: FxHashMap<TargetId, Vec<BehaviorId>>,
    scheduler: Arc<dyn TimerScheduler>,
    bus: DispatchSender,
    rx: DispatchReceiver,
}

impl Dispatcher {
    pub fn new(scheduler: Arc<dyn TimerScheduler>, bus: DispatchSender, rx: DispatchReceiver) -> Self {
        Self {
            behaviors: SlotMap::with_key(),
            subscriptions: FxHashMap::default(),
            scheduler,
            bus,
            rx,
        }
    }

    /// Dispatcher driven by a virtual clock; time only moves through `ManualClock::advance`.
    pub fn with_manual_clock() -> (Self, ManualClock) {
        let (bus, rx) = dispatch_bus();
        let clock = ManualClock::new(bus.clone());
        let dispatcher = Self::new(Arc::new(clock.clone()), bus, rx);
        (dispatcher, clock)
    }

    /// Dispatcher whose timers run on the tokio runtime.
    pub fn with_runtime(runtime: &AsyncRuntime) -> Self {
        let (bus, rx) = dispatch_bus();
        let scheduler = runtime.scheduler(bus.clone());
        Self::new(scheduler, bus, rx)
    }

    /// Posting handle for other threads (input readers, timers).
    pub fn sender(&self) -> DispatchSender {
        self.bus.clone()
    }

    /// Attaches a behavior built for `target`, snapshotting `initial_text` for it.
    pub fn attach<B, F>(&mut self, target: TargetId, initial_text: &str, build: F) -> BehaviorId
    where
        B: Behavior,
        F: FnOnce(TimerContext, &str) -> B,
    {
        let scheduler = Arc::clone(&self.scheduler);
        let id = self.behaviors.insert_with_key(|id| {
            let behavior = build(TimerContext::new(id, scheduler), initial_text);
            Attached {
                target,
                behavior: Box::new(behavior),
            }
        });
        self.subscribe(target, id);
        tracing::debug!(
            behavior = ?id,
            target = target.raw(),
            name = self.behaviors[id].behavior.name(),
            "behavior attached"
        );
        id
    }

    /// Detaches and disposes a behavior. Detaching twice is a no-op returning `false`.
    pub fn detach(&mut self, id: BehaviorId) -> bool {
        let Some(mut attached) = self.behaviors.remove(id) else {
            return false;
        };
        self.unsubscribe(attached.target, id);
        attached.behavior.detach();
        tracing::debug!(
            behavior = ?id,
            target = attached.target.raw(),
            name = attached.behavior.name(),
            "behavior detached"
        );
        true
    }

    pub fn detach_target(&mut self, target: TargetId) -> usize {
        let ids = self.subscriptions.get(&target).cloned().unwrap_or_default();
        ids.into_iter().filter(|id| self.detach(*id)).count()
    }

    pub fn is_attached(&self, id: BehaviorId) -> bool {
        self.behaviors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn behavior_mut<B: Behavior>(&mut self, id: BehaviorId) -> Result<&mut B, HostError> {
        let attached = self
            .behaviors
            .get_mut(id)
            .ok_or(HostError::UnknownBehavior(id))?;
        let actual = attached.behavior.name();
        (*attached.behavior)
            .downcast_mut::<B>()
            .ok_or(HostError::TypeMismatch { id, actual })
    }

    /// Hands `event` to every behavior attached to `target`, in attach order.
    pub fn deliver(&mut self, target: TargetId, event: &InputEvent) -> usize {
        let Some(ids) = self.subscriptions.get(&target) else {
            return 0;
        };
        let mut delivered = 0;
        for id in ids {
            if let Some(attached) = self.behaviors.get_mut(*id) {
                attached.behavior.on_event(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Drains queued bus messages without blocking. Returns how many were drained, including
    /// fires dropped because their owner is detached.
    pub fn pump(&mut self) -> usize {
        let mut drained = 0usize;
        while drained < MAX_DISPATCH_DRAIN_PER_PUMP {
            match self.rx.try_recv() {
                Ok(msg) => {
                    drained += 1;
                    self.handle(msg);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        drained
    }

    /// Blocks up to `timeout` for the next message, then drains whatever else is queued.
    ///
    /// Counts drained messages the same way `pump` does.
    pub fn wait(&mut self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.handle(msg);
                1 + self.pump()
            }
            Err(_) => 0,
        }
    }

    fn handle(&mut self, msg: DispatchMessage) {
        match msg {
            DispatchMessage::TimerFired(fire) => self.route_fire(fire),
            DispatchMessage::Input { target, event } => {
                self.deliver(target, &event);
            }
        }
    }

    fn route_fire(&mut self, fire: TimerFire) {
        match self.behaviors.get_mut(fire.owner) {
            Some(attached) => attached.behavior.on_timer(fire.generation),
            None => tracing::debug!(
                behavior = ?fire.owner,
                generation = fire.generation,
                "fire for detached behavior dropped"
            ),
        }
    }
}

impl EventSource for Dispatcher {
    fn subscribe(&mut self, target: TargetId, behavior: BehaviorId) {
        let ids = self.subscriptions.entry(target).or_default();
        if !ids.contains(&behavior) {
            ids.push(behavior);
        }
    }

    fn unsubscribe(&mut self, target: TargetId, behavior: BehaviorId) -> bool {
        let Some(ids) = self.subscriptions.get_mut(&target) else {
            return false;
        };
        let before = ids.len();
        ids.retain(|id| *id != behavior);
        let removed = ids.len() != before;
        if ids.is_empty() {
            self.subscriptions.remove(&target);
        }
        removed
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        for (_, attached) in self.behaviors.iter_mut() {
            attached.behavior.detach();
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/services/host.rs"]
mod tests;
