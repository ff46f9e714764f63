//! Level configuration table
//!
//! Difficulty rises with the level: faster obstacles, tighter spawn gaps and
//! a heavier, snappier jump.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LEVEL, MIN_LEVEL};

/// Tunable physics and pacing for one level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Obstacle speed (pixels per tick)
    pub speed: f64,
    /// Spawn delay bounds in milliseconds, `[min, max)`
    pub spawn_ms: (f64, f64),
    /// Downward acceleration (pixels per tick²)
    pub gravity: f64,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_vel: f64,
}

const LEVELS: [LevelConfig; 3] = [
    LevelConfig {
        speed: 3.0,
        spawn_ms: (1200.0, 2000.0),
        gravity: 0.6,
        jump_vel: -11.0,
    },
    LevelConfig {
        speed: 4.0,
        spawn_ms: (900.0, 1500.0),
        gravity: 0.7,
        jump_vel: -12.5,
    },
    LevelConfig {
        speed: 5.2,
        spawn_ms: (700.0, 1200.0),
        gravity: 0.75,
        jump_vel: -13.0,
    },
];

impl LevelConfig {
    /// Look up a level. Unknown ids fall back to level 1.
    pub fn for_level(level: u8) -> &'static LevelConfig {
        match level {
            1..=3 => &LEVELS[(level - 1) as usize],
            _ => &LEVELS[0],
        }
    }

    /// Map a spawn-delay sample in `[0, 1)` onto `[min, max)`
    pub fn spawn_delay(&self, unit: f64) -> f64 {
        let (min, max) = self.spawn_ms;
        let delay = min + unit.clamp(0.0, 1.0) * (max - min);
        // A sample of exactly 1.0 (or float rounding) must not reach `max`
        if delay >= max { min.max(max - 1.0) } else { delay }
    }
}

/// Clamp any integer into the valid level range
pub fn clamp_level(level: i64) -> u8 {
    level.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8
}

/// Coerce a raw level value (e.g. from a picker widget) into a valid level.
///
/// Non-numeric, zero or non-finite input resolves to level 1; fractional
/// values round to the nearest level before clamping.
pub fn parse_level(raw: &str) -> u8 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => clamp_level(v.round() as i64),
        _ => MIN_LEVEL,
    }
}
