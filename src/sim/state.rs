//! Game state and core simulation types
//!
//! Everything the per-tick update mutates lives in `GameState`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::LevelConfig;
use super::rng::RandomSource;
use crate::consts::*;

/// RGBA color, components in `[0, 1]`
pub type Color = [f32; 4];

/// Build an opaque color from a `0xRRGGBB` literal
pub const fn hex_color(rgb: u32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

pub const PLAYER_COLOR: Color = hex_color(0x2563eb);
pub const OBSTACLE_COLOR: Color = hex_color(0xf59e0b);

/// Logical drawing area and the ground line inside it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    /// Y of the ground line (players stand with their bottom edge here)
    pub ground: f64,
}

impl Arena {
    /// Arena for a surface size; missing or degenerate sizes use the defaults
    pub fn new(width: Option<f64>, height: Option<f64>) -> Self {
        let valid = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
        let width = valid(width).unwrap_or(DEFAULT_WIDTH);
        let height = valid(height).unwrap_or(DEFAULT_HEIGHT);
        Self {
            width,
            height,
            ground: (height * GROUND_RATIO).floor(),
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
    pub size: DVec2,
    /// Vertical velocity (pixels per tick, negative is up)
    pub vy: f64,
    pub grounded: bool,
    pub color: Color,
}

impl Player {
    pub fn new(arena: &Arena) -> Self {
        let mut player = Self {
            pos: DVec2::new(PLAYER_X, 0.0),
            size: DVec2::splat(PLAYER_SIZE),
            vy: 0.0,
            grounded: true,
            color: PLAYER_COLOR,
        };
        player.stand(arena);
        player
    }

    /// Highest y the player may occupy (standing on the ground)
    #[inline]
    pub fn floor_y(&self, arena: &Arena) -> f64 {
        arena.ground - self.size.y
    }

    /// Put the player back on the ground at rest
    pub fn stand(&mut self, arena: &Arena) {
        self.pos.y = self.floor_y(arena);
        self.vy = 0.0;
        self.grounded = true;
    }

    /// Start a jump if standing. Returns true if the jump fired.
    pub fn try_jump(&mut self, jump_vel: f64) -> bool {
        if !self.grounded {
            return false;
        }
        self.vy = jump_vel;
        self.grounded = false;
        true
    }

    /// Apply gravity and move, clamping to the ground and the top edge
    pub fn integrate(&mut self, gravity: f64, arena: &Arena) {
        self.vy += gravity;
        self.pos.y += self.vy;

        let floor = self.floor_y(arena);
        if self.pos.y >= floor {
            self.pos.y = floor;
            self.vy = 0.0;
            self.grounded = true;
        } else if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vy = self.vy.max(0.0);
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: DVec2,
    pub size: DVec2,
    pub color: Color,
}

impl Obstacle {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(w, h),
            color: OBSTACLE_COLOR,
        }
    }

    /// Obstacle entering at the right edge with a random footprint
    pub fn spawn(arena: &Arena, rng: &mut dyn RandomSource) -> Self {
        let w = rng.range_inclusive(OBSTACLE_MIN_SIZE, OBSTACLE_MAX_SIZE) as f64;
        let h = rng.range_inclusive(OBSTACLE_MIN_SIZE, OBSTACLE_MAX_SIZE) as f64;
        Self::new(
            arena.width + SPAWN_MARGIN,
            arena.ground - OBSTACLE_GROUND_OFFSET,
            w,
            h,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Complete simulation state for one engine instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub player: Player,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub lives: u8,
    /// Current level (1..=3)
    pub level: u8,
    /// Milliseconds accumulated since the last spawn
    pub spawn_timer: f64,
    /// Milliseconds until the next spawn
    pub next_spawn_delay: f64,
}

impl GameState {
    pub fn new(arena: Arena, level: u8, rng: &mut dyn RandomSource) -> Self {
        let mut state = Self {
            arena,
            player: Player::new(&arena),
            obstacles: Vec::new(),
            score: 0,
            lives: START_LIVES,
            level,
            spawn_timer: 0.0,
            next_spawn_delay: 0.0,
        };
        state.reset(rng);
        state
    }

    /// Configuration for the current level
    pub fn config(&self) -> &'static LevelConfig {
        LevelConfig::for_level(self.level)
    }

    /// Start a fresh run at the current level
    pub fn reset(&mut self, rng: &mut dyn RandomSource) {
        self.player.stand(&self.arena);
        self.obstacles.clear();
        self.score = 0;
        self.lives = START_LIVES;
        self.spawn_timer = 0.0;
        self.roll_spawn_delay(rng);
    }

    /// Draw a new next-spawn delay from the current level's bounds
    pub fn roll_spawn_delay(&mut self, rng: &mut dyn RandomSource) {
        self.next_spawn_delay = self.config().spawn_delay(rng.next_unit());
    }

    /// True once all lives are spent
    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    /// Immutable projection for rendering
    pub fn scene(&self) -> Scene {
        Scene {
            arena: self.arena,
            player: self.player.rect(),
            player_color: self.player.color,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| (o.rect(), o.color))
                .collect(),
            score: self.score,
            lives: self.lives,
            level: self.level,
        }
    }
}

/// Per-tick snapshot handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub arena: Arena,
    pub player: Rect,
    pub player_color: Color,
    pub obstacles: Vec<(Rect, Color)>,
    pub score: u64,
    pub lives: u8,
    pub level: u8,
}
