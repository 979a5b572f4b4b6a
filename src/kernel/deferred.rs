//! Cancellable deferred action.
//!
//! Holds at most one pending action. Scheduling retires whatever was pending before, and a
//! fire only runs the action when the generation it carries is still current.

use std::fmt;
use std::time::Duration;

use super::behavior::TimerContext;
use super::cancel::TokenSource;
use super::services::ports::TimerHandle;

/// Only ever present for the current generation; every retirement clears it.
struct Pending {
    action: Box<dyn FnOnce()>,
    _timer: TimerHandle,
}

pub struct DeferredAction {
    timer: TimerContext,
    tokens: TokenSource,
    pending: Option<Pending>,
    disposed: bool,
}

impl DeferredAction {
    pub fn new(timer: TimerContext) -> Self {
        Self {
            timer,
            tokens: TokenSource::new(),
            pending: None,
            disposed: false,
        }
    }

    /// Runs `action` after `delay` unless superseded first.
    ///
    /// Silently ignored once disposed.
    pub fn schedule(&mut self, delay: Duration, action: impl FnOnce() + 'static) {
        if self.disposed {
            tracing::debug!(owner = ?self.timer.owner(), "schedule after dispose ignored");
            return;
        }

        // Retire the old token before its timer handle goes away.
        self.tokens.invalidate();
        self.pending = None;

        let token = self.tokens.issue();
        let timer = self.timer.start(delay, token.generation());
        tracing::trace!(
            owner = ?self.timer.owner(),
            generation = token.generation(),
            delay_ms = delay.as_millis() as u64,
            "deferred action scheduled"
        );
        self.pending = Some(Pending {
            action: Box::new(action),
            _timer: timer,
        });
    }

    /// Retires the pending action, if any, without scheduling a new one.
    ///
    /// Returns whether something was pending.
    pub fn supersede(&mut self) -> bool {
        self.tokens.invalidate();
        let superseded = self.pending.take().is_some();
        if superseded {
            tracing::trace!(owner = ?self.timer.owner(), "deferred action superseded");
        }
        superseded
    }

    /// Delivers an elapsed timer. Returns whether the action ran.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.disposed {
            tracing::debug!(owner = ?self.timer.owner(), generation, "fire after dispose dropped");
            return false;
        }
        if !self.tokens.is_current_generation(generation) {
            tracing::debug!(
                owner = ?self.timer.owner(),
                generation,
                current = self.tokens.generation(),
                "stale deferred fire dropped"
            );
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        // Spend the token so a duplicate fire for this generation is a no-op.
        self.tokens.invalidate();
        (pending.action)();
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Cancels anything pending and rejects later scheduling. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.tokens.invalidate();
        self.pending = None;
    }
}

impl fmt::Debug for DeferredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredAction")
            .field("owner", &self.timer.owner())
            .field("generation", &self.tokens.generation())
            .field("pending", &self.pending.is_some())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/deferred.rs"]
mod tests;
