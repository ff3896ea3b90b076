//! Stair Climber headless runner
//!
//! Plays a demo session with the autopilot at a fixed 60 Hz step and logs
//! what happens. Usage: `stair-climber [ticks]` (default 3600).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Stair Climber (headless) starting...");

    let ticks = match std::env::args().nth(1) {
        None => 3600,
        Some(arg) => match arg.parse::<u64>() {
            Ok(n) => n,
            Err(e) => {
                log::error!("Invalid tick count {:?}: {}", arg, e);
                std::process::exit(2);
            }
        },
    };

    let config = match stair_climber::Config::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Bad configuration ({}), falling back to defaults", e);
            stair_climber::Config::default()
        }
    };

    let summary = headless::run(config, ticks);
    println!(
        "ticks {} | height {} | best {} | resets {} | platforms {} | audio errors {}",
        summary.ticks,
        summary.score,
        summary.best_score,
        summary.resets,
        summary.platforms,
        summary.audio_failures
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives the library directly
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use stair_climber::Config;
    use stair_climber::audio::{SilentBackend, SoundSink};
    use stair_climber::consts::SIM_DT;
    use stair_climber::scene;
    use stair_climber::sim::{Autopilot, GameEvent, TickInput, World, tick};
    use stair_climber::ui::{self, MenuButton};

    /// Log a line every this many score units
    const MILESTONE: u64 = 10;

    pub struct Summary {
        pub ticks: u64,
        pub score: u64,
        pub best_score: u64,
        pub resets: u32,
        pub platforms: usize,
        pub audio_failures: u32,
    }

    /// Highest multiple of `MILESTONE` passed when the score moves `from -> to`
    pub fn crossed_milestone(from: u64, to: u64) -> Option<u64> {
        let mark = to / MILESTONE * MILESTONE;
        (mark > from && mark > 0).then_some(mark)
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run(config: Config, ticks: u64) -> Summary {
        let seed = config.seed.unwrap_or_else(time_seed);
        log::info!("Game initialized with seed: {}", seed);

        let mut sink = SoundSink::new(SilentBackend::default(), &config);
        let mut world = World::new(config, seed);
        let mut pilot = Autopilot::new();
        sink.start_music();

        let start = TickInput {
            click: Some(ui::button_center(MenuButton::Start)),
            ..Default::default()
        };
        tick(&mut world, &start, SIM_DT);
        sink.handle_events(&world.drain_events());

        let mut played = 0;
        let mut last_score = world.score;
        while played < ticks && !world.exit_requested {
            let input = pilot.next_input(&world);
            tick(&mut world, &input, SIM_DT);
            played += 1;

            let events = world.drain_events();
            for event in &events {
                match event {
                    GameEvent::Climbed { score } => {
                        if let Some(mark) = crossed_milestone(last_score, *score) {
                            log::info!("Reached height {} at tick {}", mark, world.time_ticks);
                        }
                        last_score = *score;
                    }
                    GameEvent::Reset(cause) => {
                        log::info!("Reset #{} ({:?}) at tick {}", world.resets, cause, played);
                        last_score = 0;
                    }
                    _ => {}
                }
            }
            sink.handle_events(&events);

            let frame = scene::build_scene(&world);
            log::trace!("frame {}: {} draw commands", played, frame.len());
        }

        sink.stop_music();
        log::info!("Session over after {} ticks", played);

        Summary {
            ticks: played,
            score: world.score,
            best_score: world.best_score,
            resets: world.resets,
            platforms: world.platforms.len(),
            audio_failures: sink.failures(),
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::headless::crossed_milestone;

    #[test]
    fn test_milestone_hit_exactly() {
        assert_eq!(crossed_milestone(9, 10), Some(10));
        assert_eq!(crossed_milestone(10, 11), None);
    }

    #[test]
    fn test_milestone_jumped_over() {
        assert_eq!(crossed_milestone(9, 11), Some(10));
        assert_eq!(crossed_milestone(8, 23), Some(20));
        assert_eq!(crossed_milestone(0, 9), None);
        assert_eq!(crossed_milestone(0, 0), None);
    }
}
