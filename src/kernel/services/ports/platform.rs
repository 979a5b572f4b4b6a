use std::time::Duration;

/// Used whenever the platform cannot report its double-click time.
pub const DEFAULT_DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

pub const DOUBLE_CLICK_ENV: &str = "GESTUREGATE_DOUBLE_CLICK_MS";

/// Source of the double-click interval the click disambiguator waits for.
pub trait DoubleClickInterval {
    /// `None` means the lookup failed; callers fall back to a fixed default.
    fn double_click_interval(&self) -> Option<Duration>;

    fn resolve(&self) -> Duration {
        self.double_click_interval()
            .unwrap_or(DEFAULT_DOUBLE_CLICK_INTERVAL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDoubleClickInterval(pub Duration);

impl DoubleClickInterval for FixedDoubleClickInterval {
    fn double_click_interval(&self) -> Option<Duration> {
        Some(self.0)
    }
}

/// Reads the host's double-click time from `GESTUREGATE_DOUBLE_CLICK_MS`.
///
/// The variable is re-read on every query so a changed system setting is picked up by the
/// next click, matching how native double-click detection behaves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDoubleClickInterval;

impl DoubleClickInterval for SystemDoubleClickInterval {
    fn double_click_interval(&self) -> Option<Duration> {
        let raw = std::env::var(DOUBLE_CLICK_ENV).ok()?;
        parse_interval_ms(&raw)
    }
}

pub(crate) fn parse_interval_ms(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
    }
}
