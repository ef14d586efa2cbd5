//! Lane Runner entry point
//!
//! Native: headless autopilot that plays the simulation for a fixed amount of
//! game time and keeps its best run on disk.
//!
//! Usage: `lane-runner [seed] [seconds] [tuning.json]`
//!
//! Web: the page drives `lane_runner::web::WebGame` directly.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use lane_runner::audio::AudioManager;
    use lane_runner::input::InputEvent;
    use lane_runner::persistence::FileStorage;
    use lane_runner::platform::{self, FixedClock, HeadlessPlatform};
    use lane_runner::sim::GameState;
    use lane_runner::{GameSession, Settings, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const DEFAULT_SECONDS: f32 = 60.0;
    const SAVE_DIR: &str = ".lane-runner";
    /// How far ahead (z) the autopilot reacts to obstacles
    const LOOKAHEAD: f32 = 14.0;

    struct Args {
        seed: u64,
        seconds: f32,
        tuning: Option<String>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = std::env::args().skip(1);
        let seed = match args.next() {
            Some(s) => s.parse().map_err(|_| format!("invalid seed: {}", s))?,
            None => platform::clock_seed(),
        };
        let seconds = match args.next() {
            Some(s) => s
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .ok_or_else(|| format!("invalid duration: {}", s))?,
            None => DEFAULT_SECONDS,
        };
        Ok(Args {
            seed,
            seconds,
            tuning: args.next(),
        })
    }

    fn load_tuning(path: Option<&str>) -> Result<Tuning, String> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
        Tuning::from_json(&json).map_err(|e| format!("{}: {}", path, e))
    }

    fn lane_blocked(state: &GameState, tuning: &Tuning, lane: usize) -> bool {
        let x = tuning.lane_x[lane];
        state.obstacles.iter().any(|o| {
            (o.pos.x - x).abs() < 0.5 && o.pos.z > state.player.pos.z && o.pos.z < LOOKAHEAD
        })
    }

    /// Step out of the current lane when an obstacle is coming
    fn autopilot(state: &GameState, tuning: &Tuning) -> Option<InputEvent> {
        let lane = state.player.lane.target_lane();
        if !lane_blocked(state, tuning, lane) {
            return None;
        }
        let left = lane.checked_sub(1).filter(|&l| !lane_blocked(state, tuning, l));
        let right = Some(lane + 1)
            .filter(|&l| l < state.player.lane.lane_count() && !lane_blocked(state, tuning, l));
        match (left, right) {
            (Some(_), _) => Some(InputEvent::LaneLeft),
            (None, Some(_)) => Some(InputEvent::LaneRight),
            (None, None) => None,
        }
    }

    pub fn run() -> Result<(), String> {
        let args = parse_args()?;
        let tuning = load_tuning(args.tuning.as_deref())?;

        let storage = FileStorage::open(SAVE_DIR).map_err(|e| e.to_string())?;
        let settings = Settings::load(&storage);
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let mut session = GameSession::new(
            tuning,
            args.seed,
            HeadlessPlatform::with_audio(audio),
            storage,
        );
        let mut clock = FixedClock(FRAME_DT);

        let frames = (args.seconds / FRAME_DT).ceil() as u64;
        let mut runs = 1;
        for _ in 0..frames {
            if session.is_game_over() {
                session.handle_input(InputEvent::Restart);
                runs += 1;
            }
            if let Some(event) = autopilot(session.state(), session.tuning()) {
                session.handle_input(event);
            }
            session.frame(&mut clock);
        }

        let platform = session.platform();
        println!(
            "seed {} | {} run(s) | last run: {} collected, {} m",
            args.seed, runs, platform.score, platform.distance
        );
        if let Some(best) = session.best_run().load() {
            println!("{}", best.label());
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    lane_runner::platform::init_logging();
    log::info!("Lane Runner (headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is lane_runner::web::start, this is just to satisfy the compiler
}
