//! gesturegate - gesture and input-rate behaviors for event-driven UIs
//!
//! Module layout:
//! - core: commands and input events
//! - kernel: cancellation tokens, timers, behaviors, dispatch host
//! - tui: terminal adapter (click counting, terminal restore)

pub mod core;
pub mod kernel;
#[cfg(feature = "tui")]
pub mod tui;

pub use crate::core::{ClickEvent, Command, CommandBinding, InputEvent, RelayCommand, TargetId, TextChange};
pub use kernel::{ChangeDebouncer, ClickDisambiguator, Dispatcher};
