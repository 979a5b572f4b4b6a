use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::platform::{DoubleClickInterval, FixedDoubleClickInterval, SystemDoubleClickInterval};

pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorSettings {
    #[serde(default = "default_debounce_delay_ms", alias = "debounce_delay_ms")]
    pub debounce_delay_ms: u64,
    /// Overrides the platform double-click time when set.
    #[serde(
        default,
        alias = "double_click_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub double_click_ms: Option<u64>,
}

fn default_debounce_delay_ms() -> u64 {
    DEFAULT_DEBOUNCE_DELAY_MS
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            double_click_ms: None,
        }
    }
}

impl BehaviorSettings {
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    pub fn double_click_interval(&self) -> Arc<dyn DoubleClickInterval> {
        match self.double_click_ms.filter(|ms| *ms > 0) {
            Some(ms) => Arc::new(FixedDoubleClickInterval(Duration::from_millis(ms))),
            None => Arc::new(SystemDoubleClickInterval),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
