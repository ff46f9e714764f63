//! Tick scheduling
//!
//! Hosts with frame callbacks tick once per frame. Hosts without them fall
//! back to a fixed-interval timer. Either way a tick is represented by a
//! `PendingTick` that the engine arms after every update and drops on stop.

use crate::consts::FALLBACK_INTERVAL_MS;

/// Scheduling facilities the host offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// The host calls back once per display frame
    pub frame_callbacks: bool,
}

impl HostCapabilities {
    /// Host with display frame callbacks
    pub const FRAMES: Self = Self {
        frame_callbacks: true,
    };
    /// Host with timers only
    pub const TIMERS: Self = Self {
        frame_callbacks: false,
    };
}

/// How ticks are paced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickSchedule {
    /// One tick per host frame callback
    HostFrame,
    /// One tick per elapsed interval
    FixedInterval { interval_ms: f64 },
}

impl TickSchedule {
    /// Pick the schedule for a host, falling back to a ~60 Hz timer
    pub fn for_host(caps: HostCapabilities) -> Self {
        if caps.frame_callbacks {
            TickSchedule::HostFrame
        } else {
            log::info!(
                "host has no frame callbacks, ticking every {}ms",
                FALLBACK_INTERVAL_MS
            );
            TickSchedule::FixedInterval {
                interval_ms: FALLBACK_INTERVAL_MS,
            }
        }
    }

    /// Arm the tick that follows one fired (or started) at `now_ms`
    pub fn arm(&self, now_ms: f64) -> PendingTick {
        match *self {
            TickSchedule::HostFrame => PendingTick::immediate(),
            TickSchedule::FixedInterval { interval_ms } => PendingTick {
                due_ms: now_ms + interval_ms.max(0.0),
            },
        }
    }
}

/// A scheduled tick that has not fired yet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTick {
    pub due_ms: f64,
}

impl PendingTick {
    /// A tick that fires on the very next callback, whatever the clock says
    pub fn immediate() -> Self {
        Self {
            due_ms: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms >= self.due_ms
    }

    /// Milliseconds left before the tick is due
    pub fn remaining(&self, now_ms: f64) -> f64 {
        (self.due_ms - now_ms).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_without_frames() {
        assert_eq!(
            TickSchedule::for_host(HostCapabilities::TIMERS),
            TickSchedule::FixedInterval { interval_ms: 16.0 }
        );
        assert_eq!(
            TickSchedule::for_host(HostCapabilities::FRAMES),
            TickSchedule::HostFrame
        );
    }

    #[test]
    fn test_fixed_interval_due() {
        let pending = TickSchedule::FixedInterval { interval_ms: 16.0 }.arm(100.0);
        assert!(!pending.is_due(115.9));
        assert_eq!(pending.remaining(110.0), 6.0);
        assert!(pending.is_due(116.0));
        assert_eq!(pending.remaining(200.0), 0.0);
    }

    #[test]
    fn test_host_frame_due_immediately() {
        let pending = TickSchedule::HostFrame.arm(50.0);
        assert!(pending.is_due(50.0));
        assert!(pending.is_due(-1.0e9));
        assert_eq!(pending.remaining(50.0), 0.0);
    }
}
