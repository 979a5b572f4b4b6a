//! Host-side click counting: turns raw mouse-downs into `ClickEvent`s.

use std::time::{Duration, Instant};

use crate::core::ClickEvent;

/// Cells a repeat click may drift from the previous one and still count.
pub const DEFAULT_CLICK_SLOP: u16 = 1;

pub struct ClickCounter {
    last_down: Option<(u16, u16, Instant)>,
    click_count: u32,
    threshold: Duration,
    slop: u16,
}

impl ClickCounter {
    pub fn new(threshold: Duration) -> Self {
        Self {
            last_down: None,
            click_count: 0,
            threshold,
            slop: DEFAULT_CLICK_SLOP,
        }
    }

    pub fn with_slop(mut self, slop: u16) -> Self {
        self.slop = slop;
        self
    }

    /// A button went down at cell `(x, y)`.
    pub fn on_mouse_down(&mut self, x: u16, y: u16, now: Instant) -> ClickEvent {
        let repeat = self.last_down.is_some_and(|(last_x, last_y, last_time)| {
            x.abs_diff(last_x) <= self.slop
                && y.abs_diff(last_y) <= self.slop
                && now.saturating_duration_since(last_time) <= self.threshold
        });

        self.click_count = if repeat {
            self.click_count.saturating_add(1)
        } else {
            1
        };
        self.last_down = Some((x, y, now));

        ClickEvent::new(self.click_count)
    }

    pub fn reset(&mut self) {
        self.last_down = None;
        self.click_count = 0;
    }
}
