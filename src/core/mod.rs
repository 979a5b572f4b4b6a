//! Core contracts shared by every behavior.
//!
//! - `command`: guarded commands and their bindings
//! - `event`: input events delivered by the host

pub mod command;
pub mod event;

pub use command::{invoke_guarded, Command, CommandBinding, RelayCommand};
pub use event::{ClickEvent, InputEvent, TargetId, TextChange, TextChangedEvent};
