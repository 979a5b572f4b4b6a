//! Text-change debouncing.
//!
//! Keeps the value from before a burst (`stable_value`) apart from the latest value
//! (`pending_value`); only a settled burst moves the stable value forward.

use std::any::Any;
use std::rc::Rc;
use std::time::Duration;

use crate::core::{invoke_guarded, Command, InputEvent, TextChange};

use super::behavior::{Behavior, TimerContext};
use super::debounce::DebounceTimer;
use super::services::ports::DEFAULT_DEBOUNCE_DELAY_MS;

pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_DELAY_MS);

pub struct ChangeDebouncer {
    command: Option<Rc<dyn Command<TextChange>>>,
    delay: Duration,
    stable_value: String,
    pending_value: String,
    timer: DebounceTimer,
}

impl ChangeDebouncer {
    /// `initial_text` is the target's value at attach time.
    pub fn new(timer: TimerContext, initial_text: impl Into<String>) -> Self {
        let initial_text = initial_text.into();
        Self {
            command: None,
            delay: DEFAULT_DEBOUNCE_DELAY,
            pending_value: initial_text.clone(),
            stable_value: initial_text,
            timer: DebounceTimer::new(timer),
        }
    }

    pub fn with_command(mut self, command: Rc<dyn Command<TextChange>>) -> Self {
        self.command = Some(command);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_command(&mut self, command: Option<Rc<dyn Command<TextChange>>>) {
        self.command = command;
    }

    /// Applies to the next change; an armed timer keeps its deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn stable_value(&self) -> &str {
        &self.stable_value
    }

    pub fn pending_value(&self) -> &str {
        &self.pending_value
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn on_text_changed(&mut self, text: &str) {
        if self.timer.is_disposed() {
            return;
        }
        self.pending_value.clear();
        self.pending_value.push_str(text);
        self.timer.arm(self.delay);
    }

    /// Delivers an elapsed timer; returns the reported change when the burst settled.
    pub fn on_settled(&mut self, generation: u64) -> Option<TextChange> {
        if !self.timer.fire(generation) {
            return None;
        }

        let change = TextChange::new(self.stable_value.clone(), self.pending_value.clone());
        let executed = self
            .command
            .as_ref()
            .is_some_and(|command| invoke_guarded(command.as_ref(), &change));
        tracing::debug!(
            executed,
            unchanged = change.is_unchanged(),
            "text change settled"
        );

        self.stable_value.clone_from(&change.new_text);
        Some(change)
    }

    pub fn dispose(&mut self) {
        self.timer.dispose();
    }
}

impl Behavior for ChangeDebouncer {
    fn name(&self) -> &'static str {
        "change_debouncer"
    }

    fn on_event(&mut self, event: &InputEvent) {
        if let Some(changed) = event.as_text_changed() {
            self.on_text_changed(&changed.text);
        }
    }

    fn on_timer(&mut self, generation: u64) {
        self.on_settled(generation);
    }

    fn detach(&mut self) {
        self.dispose();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/change.rs"]
mod tests;
