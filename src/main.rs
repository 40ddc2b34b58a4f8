//! Rubik entry point
//!
//! Headless demo: loads settings, shuffles a cube and solves it again by
//! replaying the shuffle backwards through the regular input path.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use rubik::Settings;
    use rubik::consts::*;
    use rubik::sim::{GamePhase, GameState, Move, TickInput, TwistInput, tick};

    /// Display refresh the demo pretends to run at
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 600;

    struct Demo {
        state: GameState,
        input: TickInput,
        accumulator: f32,
        frame_budget: f32,
        /// Moves still to play, next one last
        pending: Vec<Move>,
    }

    impl Demo {
        fn new(settings: &Settings, seed: u64) -> Self {
            let state = GameState::from_settings(settings, seed);
            let pending = state.shuffle_moves.iter().map(|mv| mv.inverse()).collect();
            Self {
                state,
                input: TickInput::default(),
                accumulator: 0.0,
                frame_budget: settings.frame_budget(),
                pending,
            }
        }

        /// Queue the next gesture once the cube is at rest
        fn plan(&mut self) {
            if self.input.twist.is_some() || !self.state.puzzle.is_idle() {
                return;
            }
            if let Some(mv) = self.pending.pop() {
                self.input.twist = Some(TwistInput::toward(mv.selection, mv.direction));
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(self.frame_budget);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.plan();
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.twist = None;
                self.input.answer = None;
            }
        }
    }

    /// Logger at the settings level; `RUST_LOG`-style filters override it
    fn logger(level: log::LevelFilter, filters: Option<&str>) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(level);
        if let Some(filters) = filters {
            builder.parse_filters(filters);
        }
        builder
    }

    pub fn run() {
        let path = Settings::path_from_env();
        let loaded = Settings::load_from(&path);
        let level = loaded.as_ref().map_or(log::LevelFilter::Info, Settings::log_level);
        logger(level, std::env::var("RUST_LOG").ok().as_deref()).init();
        let settings = Settings::load(&path);
        log::info!("Rubik (native) starting...");

        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        let mut demo = Demo::new(&settings, seed);
        log::info!("Game initialized with seed: {}", seed);
        log::info!("Replaying {} moves", demo.pending.len());

        for frame in 0..MAX_FRAMES {
            demo.update(FRAME_DT);

            if frame % 60 == 0 {
                log::debug!("{} | {}", demo.state.time_label(), demo.state.moves_label());
            }

            match demo.state.phase {
                GamePhase::Finished => {
                    if let Some(prompt) = demo.state.prompt() {
                        log::info!("{}", prompt);
                    }
                    log::info!("{} | {}", demo.state.time_label(), demo.state.moves_label());
                    demo.input.answer = Some(false);
                }
                GamePhase::Exited => return,
                _ => {}
            }
        }
        log::warn!("Demo did not finish within {} frames", MAX_FRAMES);
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No windowed frontend on the web target
}
