//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Randomness comes from an injected `RandomSource`
//! - Obstacles are processed in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, aabb_overlap, first_overlap};
pub use level::{LevelConfig, clamp_level, parse_level};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use state::{Arena, Color, GameState, Obstacle, Player, Scene, hex_color};
pub use tick::{TickInput, TickReport, tick};
