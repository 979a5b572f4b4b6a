//! Service adapters: OS/runtime specific implementations (timers, files).

pub mod paths;
pub mod runtime;
pub mod settings;

pub use paths::{ensure_log_dir, get_log_dir, get_settings_path};
pub use runtime::{AsyncRuntime, ManualClock, TokioTimerScheduler};
pub use settings::{
    ensure_settings_file, ensure_settings_file_at, init_settings, init_settings_at, load_settings,
    load_settings_from, SettingsError,
};
