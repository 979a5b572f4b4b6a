//! Terminal host layer (crossterm).
//!
//! Kept apart from `kernel` so the behaviors do not depend on terminal crates.

pub mod mouse;
pub mod terminal_guard;

pub use mouse::ClickCounter;
pub use terminal_guard::{TerminalGuard, TerminalRestorer, TerminationSignal};
