//! Resettable debounce timer.
//!
//! One logical timer per owner: `arm` always replaces the previous deadline, so overlapping
//! arms collapse into a single effective fire.

use std::fmt;
use std::time::Duration;

use super::behavior::TimerContext;
use super::cancel::{CancelToken, TokenSource};
use super::services::ports::TimerHandle;

pub struct DebounceTimer {
    timer: TimerContext,
    tokens: TokenSource,
    armed: Option<(CancelToken, TimerHandle)>,
    disposed: bool,
}

impl DebounceTimer {
    pub fn new(timer: TimerContext) -> Self {
        Self {
            timer,
            tokens: TokenSource::new(),
            armed: None,
            disposed: false,
        }
    }

    /// (Re)starts the timer to fire once after `delay` from now.
    ///
    /// Returns `false` once disposed.
    pub fn arm(&mut self, delay: Duration) -> bool {
        if self.disposed {
            tracing::debug!(owner = ?self.timer.owner(), "arm after dispose ignored");
            return false;
        }

        self.tokens.invalidate();
        self.armed = None;

        let token = self.tokens.issue();
        let handle = self.timer.start(delay, token.generation());
        self.armed = Some((token, handle));
        true
    }

    /// Whether an elapsed timer with `generation` is the live one.
    ///
    /// At most one call returns `true` per `arm`.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.disposed {
            tracing::debug!(owner = ?self.timer.owner(), generation, "fire after dispose dropped");
            return false;
        }
        match self.armed {
            Some((token, _)) if token.generation() == generation && self.tokens.is_current(token) => {
                self.armed = None;
                self.tokens.invalidate();
                true
            }
            _ => {
                tracing::trace!(owner = ?self.timer.owner(), generation, "stale debounce fire dropped");
                false
            }
        }
    }

    /// Disarms without disposing.
    pub fn cancel(&mut self) {
        self.tokens.invalidate();
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.cancel();
    }
}

impl fmt::Debug for DebounceTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceTimer")
            .field("owner", &self.timer.owner())
            .field("armed", &self.armed.is_some())
            .field("disposed", &self.disposed)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/debounce.rs"]
mod tests;
