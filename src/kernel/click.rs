//! Single/double click disambiguation.
//!
//! A count-1 click defers the single-click command by the double-click interval. A click with
//! count 2 or more supersedes that deferral before running the double-click command, so one
//! gesture never yields both. Supersede and the fire-time token check both run on the dispatch
//! loop, which is what makes the pair race-free.

use std::any::Any;
use std::sync::Arc;

use crate::core::{ClickEvent, CommandBinding, InputEvent};

use super::behavior::{Behavior, TimerContext};
use super::deferred::DeferredAction;
use super::services::ports::DoubleClickInterval;

pub struct ClickDisambiguator<P> {
    single_click: Option<CommandBinding<P>>,
    double_click: Option<CommandBinding<P>>,
    interval: Arc<dyn DoubleClickInterval>,
    deferred: DeferredAction,
}

impl<P: Clone + 'static> ClickDisambiguator<P> {
    pub fn new(timer: TimerContext, interval: Arc<dyn DoubleClickInterval>) -> Self {
        Self {
            single_click: None,
            double_click: None,
            interval,
            deferred: DeferredAction::new(timer),
        }
    }

    pub fn with_single_click(mut self, binding: CommandBinding<P>) -> Self {
        self.single_click = Some(binding);
        self
    }

    pub fn with_double_click(mut self, binding: CommandBinding<P>) -> Self {
        self.double_click = Some(binding);
        self
    }

    pub fn set_single_click(&mut self, binding: Option<CommandBinding<P>>) {
        self.single_click = binding;
    }

    pub fn set_double_click(&mut self, binding: Option<CommandBinding<P>>) {
        self.double_click = binding;
    }

    /// Changing the parameter here does not affect a single click already deferred.
    pub fn single_click_mut(&mut self) -> Option<&mut CommandBinding<P>> {
        self.single_click.as_mut()
    }

    pub fn double_click_mut(&mut self) -> Option<&mut CommandBinding<P>> {
        self.double_click.as_mut()
    }

    pub fn on_click(&mut self, click: ClickEvent) {
        if self.deferred.is_disposed() {
            return;
        }
        match click.click_count {
            0 => {}
            1 => self.defer_single_click(),
            count => self.resolve_double_click(count),
        }
    }

    fn defer_single_click(&mut self) {
        let Some(binding) = self.single_click.clone() else {
            return;
        };
        let interval = self.interval.resolve();
        self.deferred.schedule(interval, move || {
            let executed = binding.invoke();
            tracing::debug!(executed, "single click resolved");
        });
    }

    fn resolve_double_click(&mut self, count: u32) {
        let superseded = self.deferred.supersede();
        let executed = self
            .double_click
            .as_ref()
            .is_some_and(|binding| binding.invoke());
        tracing::debug!(count, superseded, executed, "double click resolved");
    }

    /// Delivers an elapsed interval; returns whether the single-click command path ran.
    pub fn on_interval_elapsed(&mut self, generation: u64) -> bool {
        self.deferred.fire(generation)
    }

    pub fn is_pending(&self) -> bool {
        self.deferred.is_pending()
    }

    pub fn dispose(&mut self) {
        self.deferred.dispose();
    }
}

impl<P: Clone + 'static> Behavior for ClickDisambiguator<P> {
    fn name(&self) -> &'static str {
        "click_disambiguator"
    }

    fn on_event(&mut self, event: &InputEvent) {
        if let Some(click) = event.as_click() {
            self.on_click(*click);
        }
    }

    fn on_timer(&mut self, generation: u64) {
        self.on_interval_elapsed(generation);
    }

    fn detach(&mut self) {
        self.dispose();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/click.rs"]
mod tests;
