//! Headless behavior core: cancellation tokens, timers, behaviors and the dispatch host.

pub mod behavior;
pub mod cancel;
pub mod change;
pub mod click;
pub mod debounce;
pub mod deferred;
pub mod services;

pub use behavior::{Behavior, BehaviorId, TimerContext};
pub use cancel::{CancelToken, TokenSource};
pub use change::{ChangeDebouncer, DEFAULT_DEBOUNCE_DELAY};
pub use click::ClickDisambiguator;
pub use debounce::DebounceTimer;
pub use deferred::DeferredAction;
pub use services::{Dispatcher, EventSource, HostError};
