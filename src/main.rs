//! Circus Challenge native entry point
//!
//! Runs the engine headless with a simple autopilot pressing the jump key,
//! records the result on the leaderboard and prints the final frame.
//!
//! Usage: `circus-challenge [--fast] [--level N] [--seconds N]` (see `--help`)
//!
//! Settings and scores live in `$CIRCUS_DATA_DIR` (default `.circus`).

use std::rc::Rc;
use std::time::Duration;

use clap::Parser;

use circus_challenge::engine::{Engine, SurfaceDescriptor};
use circus_challenge::events::{EventBus, GameEvent};
use circus_challenge::highscores::HighScoreStore;
use circus_challenge::input::InputSignal;
use circus_challenge::persistence::FileStorage;
use circus_challenge::platform::{Clock, HostCapabilities, ManualClock, SystemClock, TickSchedule};
use circus_challenge::render::{AsciiSurface, draw_scene};
use circus_challenge::session::{FixedInitials, Session};
use circus_challenge::settings::Settings;
use circus_challenge::sim::{RandomSource, SeededRandom};

/// Command-line arguments for the headless runner.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Advance a simulated clock instead of sleeping between ticks.
    #[arg(long)]
    fast: bool,
    /// Starting level, overriding the saved settings.
    #[arg(long, value_name = "LEVEL", value_parser = clap::value_parser!(i64).range(1..=3))]
    level: Option<i64>,
    /// Give up after this many (possibly simulated) seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 60.0, value_parser = parse_seconds)]
    seconds: f64,
}

fn parse_seconds(raw: &str) -> Result<f64, String> {
    let seconds: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if seconds.is_finite() && seconds > 0.0 {
        Ok(seconds)
    } else {
        Err(format!("expected a positive number of seconds, got {raw}"))
    }
}

/// Jumps when an obstacle gets close, and now and then reacts too late
struct Autopilot {
    rng: SeededRandom,
    /// Chance of ignoring an approaching obstacle
    miss_rate: f64,
    /// Obstacle count seen last frame, to roll once per obstacle
    seen: usize,
    distracted: bool,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: SeededRandom::new(seed ^ 0x5eed),
            miss_rate: 0.15,
            seen: 0,
            distracted: false,
        }
    }

    fn steer(&mut self, engine: &mut Engine) {
        let state = engine.state();
        let player = state.player.rect();
        let lookahead = state.config().speed * 14.0;

        if state.obstacles.len() > self.seen {
            self.distracted = self.rng.next_unit() < self.miss_rate;
        }
        self.seen = state.obstacles.len();

        let threat = state.obstacles.iter().any(|o| {
            let gap = o.pos.x - player.right();
            (0.0..lookahead).contains(&gap)
        });
        let signal = if threat && !self.distracted {
            InputSignal::KeyDown(" ".into())
        } else {
            InputSignal::KeyUp(" ".into())
        };
        engine.handle_input(signal);
    }
}

fn main() {
    env_logger::init();
    log::info!("Circus Challenge (native) starting...");

    let args = CliArgs::parse();
    let data_dir = std::env::var("CIRCUS_DATA_DIR").unwrap_or_else(|_| ".circus".to_string());
    let storage = Rc::new(FileStorage::new(data_dir));
    let settings = Settings::load(&storage);

    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("seed {seed}");

    let bus = EventBus::new();
    bus.subscribe(|event| {
        if !matches!(event, GameEvent::ScoreChanged { .. }) {
            log::info!("{}", serde_json::to_string(event).unwrap_or_default());
        }
    });
    let session = Session::new(
        Rc::clone(&bus),
        HighScoreStore::new(Rc::clone(&storage)),
        FixedInitials(settings.initials.clone()),
    );

    let manual = Rc::new(ManualClock::new(0.0));
    let clock: Rc<dyn Clock> = if args.fast {
        manual.clone()
    } else {
        Rc::new(SystemClock::new())
    };

    let mut engine = Engine::new(
        Rc::clone(&bus),
        Rc::clone(&clock),
        Box::new(SeededRandom::new(seed)),
        HostCapabilities::TIMERS,
    )
    .with_schedule(TickSchedule::FixedInterval {
        interval_ms: settings.tick_interval_ms,
    });

    engine.attach(SurfaceDescriptor {
        width: settings.width,
        height: settings.height,
        surface: None,
    });
    engine.set_level(args.level.unwrap_or(settings.starting_level as i64));
    engine.start(|_, _| {});

    let mut autopilot = Autopilot::new(seed);
    let deadline = clock.now_ms() + args.seconds * 1000.0;
    while engine.is_running() && clock.now_ms() < deadline {
        autopilot.steer(&mut engine);
        engine.frame();

        let wait = engine.next_tick_in().unwrap_or(0.0);
        if args.fast {
            manual.advance(wait.max(1.0));
        } else {
            std::thread::sleep(Duration::from_secs_f64(wait.max(1.0) / 1000.0));
        }
    }

    if engine.is_running() {
        engine.stop();
        log::info!("time limit reached, run not recorded");
    }

    let mut surface = AsciiSurface::new(80, 20);
    draw_scene(&mut surface, &engine.scene());
    println!("{}", surface.frame());
    println!();
    println!("Final score: {} (level {})", engine.score(), engine.level());

    println!("\nHigh scores:");
    for (rank, entry) in session.scores().iter().enumerate() {
        println!("{:>2}. {} {:>8}  {}", rank + 1, entry.initials, entry.score, entry.date);
    }

    settings.save(&storage);
}
