//! Service ports: traits + data contracts.

pub mod platform;
pub mod runtime;
pub mod settings;

pub use platform::{
    DoubleClickInterval, FixedDoubleClickInterval, SystemDoubleClickInterval,
    DEFAULT_DOUBLE_CLICK_INTERVAL,
};
pub use runtime::{TimerFire, TimerHandle, TimerScheduler};
pub use settings::{BehaviorSettings, DEFAULT_DEBOUNCE_DELAY_MS};
