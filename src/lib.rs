//! Circus Challenge - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `engine`: Lifecycle and tick scheduling around the simulation
//! - `events`: Publish/subscribe bus for lifecycle events
//! - `input`: Raw key/level signals to logical intents
//! - `render`: Scene snapshot to drawing commands on an abstract surface
//! - `platform`: Clock and tick schedule abstraction
//! - `persistence`: Key/value storage backends
//! - `highscores`: Ranked score records
//! - `session`: Game-over to high-score glue

pub mod engine;
pub mod events;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use engine::{Engine, SurfaceDescriptor};
pub use events::{EventBus, GameEvent, SubscriptionId};
pub use highscores::{HighScoreEntry, HighScoreStore, HighScores, ScoreStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical surface size used when the host provides none
    pub const DEFAULT_WIDTH: f64 = 800.0;
    pub const DEFAULT_HEIGHT: f64 = 400.0;
    /// Ground line as a fraction of surface height
    pub const GROUND_RATIO: f64 = 0.85;

    /// Lives at the start of every run
    pub const START_LIVES: u8 = 3;
    pub const MIN_LEVEL: u8 = 1;
    pub const MAX_LEVEL: u8 = 3;

    /// Player defaults
    pub const PLAYER_X: f64 = 80.0;
    pub const PLAYER_SIZE: f64 = 32.0;

    /// Obstacles spawn this far past the right edge
    pub const SPAWN_MARGIN: f64 = 20.0;
    /// Obstacle top sits this far above the ground line
    pub const OBSTACLE_GROUND_OFFSET: f64 = 24.0;
    /// Obstacle edge length range (inclusive)
    pub const OBSTACLE_MIN_SIZE: u32 = 18;
    pub const OBSTACLE_MAX_SIZE: u32 = 32;
    /// Obstacles with x below this are evicted
    pub const EVICTION_X: f64 = -50.0;

    /// Score per millisecond per unit of level speed
    pub const SCORE_RATE: f64 = 0.02;

    /// Fallback timer interval when the host has no frame callbacks (~60 Hz)
    pub const FALLBACK_INTERVAL_MS: f64 = 16.0;

    /// Leaderboard capacity
    pub const MAX_HIGH_SCORES: usize = 20;
}
