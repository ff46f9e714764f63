//! Per-tick simulation step
//!
//! Spawn, jump, integrate, scroll, collide, score. The engine wraps this with
//! scheduling, events and rendering.

use super::collision::first_overlap;
use super::rng::RandomSource;
use super::state::{GameState, Obstacle};
use crate::consts::{EVICTION_X, SCORE_RATE};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// A jump key is currently held
    pub jump: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// An obstacle was appended
    pub spawned: bool,
    /// A jump started this tick
    pub jumped: bool,
    /// Obstacles evicted off the left edge
    pub evicted: usize,
    /// The player hit an obstacle and lost a life
    pub hit: bool,
    /// The hit spent the last life
    pub game_over: bool,
    /// Points added this tick
    pub score_delta: u64,
}

/// Points earned for `dt` milliseconds at the given speed
///
/// Saturates at `u64::MAX` for absurd `dt`.
#[inline]
pub fn score_for(dt: f64, speed: f64) -> u64 {
    (dt.max(0.0) * SCORE_RATE * speed).floor() as u64
}

/// Advance the game state by `dt` milliseconds
///
/// Does nothing once the run is over. Negative `dt` is treated as zero.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    rng: &mut dyn RandomSource,
    dt: f64,
) -> TickReport {
    let mut report = TickReport::default();
    if state.is_over() {
        return report;
    }

    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let cfg = state.config();

    // Spawn
    state.spawn_timer += dt;
    if state.spawn_timer > state.next_spawn_delay {
        state.spawn_timer = 0.0;
        state.roll_spawn_delay(rng);
        let obstacle = Obstacle::spawn(&state.arena, rng);
        log::debug!(
            "spawned {}x{} obstacle, next in {:.0}ms",
            obstacle.size.x,
            obstacle.size.y,
            state.next_spawn_delay
        );
        state.obstacles.push(obstacle);
        report.spawned = true;
    }

    // Jump (grounded gates re-triggering while the key stays held)
    if input.jump {
        report.jumped = state.player.try_jump(cfg.jump_vel);
    }

    // Physics
    state.player.integrate(cfg.gravity, &state.arena);

    // Scroll and evict
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= cfg.speed;
    }
    let before = state.obstacles.len();
    state.obstacles.retain(|o| o.pos.x >= EVICTION_X);
    report.evicted = before - state.obstacles.len();

    // Collisions: at most one hit per tick
    let player = state.player.rect();
    if first_overlap(&player, state.obstacles.iter().map(Obstacle::rect)).is_some() {
        handle_hit(state);
        report.hit = true;
        report.game_over = state.is_over();
    }

    // Score (a fatal hit freezes the final score)
    if !report.game_over {
        report.score_delta = score_for(dt, cfg.speed);
        state.score = state.score.saturating_add(report.score_delta);
    }

    report
}

/// Lose a life and clear the field
fn handle_hit(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.player.stand(&state.arena);
    state.obstacles.clear();
    log::debug!("hit, {} lives left", state.lives);
}
