//! Chase Arena headless runner
//!
//! Plays one session with a scripted evasive player and prints the final
//! frame as JSON. Usage: `chase-arena [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use chase_arena::sim::{Arena, PlayerIntent, SimulationDirector, TickInput};
    use chase_arena::{SimError, Tuning};

    const FRAME_MS: u64 = 16;
    const MAX_SESSION_MS: u64 = 5 * 60 * 1000;

    /// Run away from the nearest pursuer along both axes
    fn evade(director: &SimulationDirector) -> PlayerIntent {
        let player = director.player().position;
        let nearest = director.pursuers().iter().min_by(|a, b| {
            a.position
                .distance_squared(player)
                .total_cmp(&b.position.distance_squared(player))
        });
        match nearest {
            Some(pursuer) => {
                let away = player - pursuer.position;
                PlayerIntent {
                    left: away.x < 0.0,
                    right: away.x > 0.0,
                    up: away.y < 0.0,
                    down: away.y > 0.0,
                }
            }
            None => PlayerIntent::default(),
        }
    }

    fn load_tuning(path: Option<&str>) -> Result<Tuning, SimError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|e| {
                    SimError::InvalidConfiguration {
                        reason: format!("cannot read {path}: {e}"),
                    }
                })?;
                log::info!("Loaded tuning from {path}");
                Tuning::from_json(&json)
            }
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<(), SimError> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let tuning = load_tuning(args.first().map(String::as_str))?;
        let seed = args
            .get(1)
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0)
            });

        let mut director = SimulationDirector::new(tuning, Arena::new(1280.0, 720.0), seed, 0)?;

        let mut now = 0;
        while !director.is_over() && now < MAX_SESSION_MS {
            now += FRAME_MS;
            let intent = evade(&director);
            director.tick(&TickInput {
                now_ms: now,
                delta_ms: FRAME_MS,
                intent,
            });
        }

        let view = director.view();
        log::info!(
            "Survived {} with {} pursuers on the field",
            view.elapsed_label(),
            view.pursuer_count
        );
        println!("{}", serde_json::to_string_pretty(&view)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Chase Arena (headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by a browser host; nothing to run here
}
