//! Services layer (ports + adapters) and the dispatch loop built on them.
//!
//! - `ports`: pure contracts/types (timer scheduling, platform lookups, settings).
//! - `adapters`: OS/runtime specific implementations (tokio timers, virtual clock, files).

pub mod adapters;
pub mod bus;
pub mod host;
pub mod ports;

pub use bus::{dispatch_bus, DispatchMessage, DispatchReceiver, DispatchSender};
pub use host::{Dispatcher, EventSource, HostError, MAX_DISPATCH_DRAIN_PER_PUMP};
