//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (wall clock vs. manually advanced clock)
//! - Tick scheduling (host frame callbacks vs. fixed-interval fallback)

pub mod schedule;
pub mod time;

pub use schedule::{HostCapabilities, PendingTick, TickSchedule};
pub use time::{Clock, ManualClock, SystemClock};
