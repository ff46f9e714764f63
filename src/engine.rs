//! Engine core
//!
//! Owns one run's `GameState` and drives it: the host calls `frame()` from its
//! frame or timer callback, the engine fires a tick when one is due, then
//! reports through the tick callback, the event bus and the renderer.
//!
//! Every collaborator is injected, so an engine runs headless with a
//! `ManualClock` and `ScriptedRandom` in tests. Engines share nothing unless
//! the host hands them the same bus.

use std::rc::Rc;

use crate::events::{EventBus, GameEvent};
use crate::input::{InputAdapter, InputSignal};
use crate::platform::{Clock, HostCapabilities, PendingTick, TickSchedule};
use crate::render::{Renderer, Surface};
use crate::sim::{Arena, GameState, RandomSource, Scene, TickInput, clamp_level, tick};

/// Called after every tick with `(score, lives)`
pub type TickCallback = Box<dyn FnMut(u64, u8)>;

/// What the host offers to draw on
#[derive(Default)]
pub struct SurfaceDescriptor {
    /// Logical width (None or non-positive = default)
    pub width: Option<f64>,
    /// Logical height (None or non-positive = default)
    pub height: Option<f64>,
    /// Drawing target (None = headless)
    pub surface: Option<Box<dyn Surface>>,
}

impl SurfaceDescriptor {
    /// No surface, default size
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            surface: None,
        }
    }

    pub fn with_surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }
}

pub struct Engine {
    state: GameState,
    input: InputAdapter,
    rng: Box<dyn RandomSource>,
    events: Rc<EventBus>,
    clock: Rc<dyn Clock>,
    schedule: TickSchedule,
    renderer: Renderer,
    running: bool,
    pending: Option<PendingTick>,
    last_tick_ms: Option<f64>,
    on_tick: Option<TickCallback>,
}

impl Engine {
    /// Create a headless engine at level 1
    pub fn new(
        events: Rc<EventBus>,
        clock: Rc<dyn Clock>,
        mut rng: Box<dyn RandomSource>,
        host: HostCapabilities,
    ) -> Self {
        let state = GameState::new(Arena::default(), 1, rng.as_mut());
        Self {
            state,
            input: InputAdapter::default(),
            rng,
            events,
            clock,
            schedule: TickSchedule::for_host(host),
            renderer: Renderer::default(),
            running: false,
            pending: None,
            last_tick_ms: None,
            on_tick: None,
        }
    }

    /// Override the tick schedule picked from the host capabilities
    pub fn with_schedule(mut self, schedule: TickSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the input adapter (e.g. for custom jump keys)
    pub fn with_input(mut self, input: InputAdapter) -> Self {
        self.input = input;
        self
    }

    /// Bind a drawing surface, size the arena and start a fresh run.
    ///
    /// Missing sizes fall back to 800x400; a missing surface runs headless.
    pub fn attach(&mut self, descriptor: SurfaceDescriptor) {
        self.state.arena = Arena::new(descriptor.width, descriptor.height);
        let headless = descriptor.surface.is_none();
        self.renderer.bind(descriptor.surface);
        log::info!(
            "attached {}x{} surface{}",
            self.state.arena.width,
            self.state.arena.height,
            if headless { " (headless)" } else { "" }
        );
        self.reset();
    }

    /// Select a level, clamped to 1..=3. Applies from the next tick.
    pub fn set_level(&mut self, level: i64) {
        let level = clamp_level(level);
        if level == self.state.level {
            return;
        }
        self.state.level = level;
        log::info!("level set to {level}");
        self.events.publish(GameEvent::LevelChanged { level });
    }

    /// Start ticking. Does nothing if already running.
    ///
    /// A run that already ended is reset first.
    pub fn start(&mut self, on_tick: impl FnMut(u64, u8) + 'static) {
        if self.running {
            return;
        }
        if self.state.is_over() {
            self.reset();
        }
        self.running = true;
        self.on_tick = Some(Box::new(on_tick));
        self.last_tick_ms = None;
        self.pending = Some(PendingTick::immediate());
        log::info!("started at level {}", self.state.level);
    }

    /// Stop ticking and cancel the pending tick. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("stopped with score {}", self.state.score);
        }
        self.running = false;
        self.pending = None;
        self.last_tick_ms = None;
    }

    /// Begin a fresh run at the current level
    pub fn reset(&mut self) {
        self.state.reset(self.rng.as_mut());
        log::debug!(
            "reset, first spawn in {:.0}ms",
            self.state.next_spawn_delay
        );
        self.events.publish(GameEvent::ScoreChanged { score: 0 });
        self.events.publish(GameEvent::LivesChanged {
            lives: self.state.lives,
        });
    }

    /// Host frame/timer callback. Fires one tick if one is due.
    ///
    /// Returns true if a tick ran.
    pub fn frame(&mut self) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        let now = self.clock.now_ms();
        if !pending.is_due(now) {
            return false;
        }
        self.pending = None;

        let dt = match self.last_tick_ms {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_tick_ms = Some(now);

        self.update(dt);
        if let Some(on_tick) = self.on_tick.as_mut() {
            on_tick(self.state.score, self.state.lives);
        }

        if self.running {
            self.pending = Some(self.schedule.arm(now));
        }
        true
    }

    /// Run one simulation step of `dt` milliseconds
    pub fn update(&mut self, dt: f64) {
        let score_before = self.state.score;
        let input = TickInput {
            jump: self.input.jump_held(),
        };
        let report = tick(&mut self.state, &input, self.rng.as_mut(), dt);

        if report.hit {
            self.events.publish(GameEvent::LivesChanged {
                lives: self.state.lives,
            });
        }
        if report.game_over {
            self.stop();
            log::info!("game over, final score {}", self.state.score);
            self.events.publish(GameEvent::GameOver {
                score: self.state.score,
            });
        }
        if self.state.score != score_before {
            self.events.publish(GameEvent::ScoreChanged {
                score: self.state.score,
            });
        }

        if self.renderer.is_bound() {
            let scene = self.state.scene();
            self.renderer.render(&scene);
        }
    }

    /// Feed a raw input signal; level intents are applied immediately
    pub fn handle_input(&mut self, signal: InputSignal) {
        if let Some(level) = self.input.apply(signal) {
            self.set_level(level as i64);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u8 {
        self.state.lives
    }

    pub fn level(&self) -> u8 {
        self.state.level
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputAdapter {
        &self.input
    }

    pub fn events(&self) -> &Rc<EventBus> {
        &self.events
    }

    pub fn scene(&self) -> Scene {
        self.state.scene()
    }

    /// Milliseconds until the pending tick is due (None when stopped)
    pub fn next_tick_in(&self) -> Option<f64> {
        let now = self.clock.now_ms();
        self.pending.map(|p| p.remaining(now))
    }
}
