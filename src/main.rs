//! Dive Invaders headless runner
//!
//! Drives the simulation with a scripted autopilot at a fixed 60 Hz clock and
//! logs the session. Run with `--help` for the options.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::HashSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result};
    use clap::Parser;
    use dive_invaders::audio::LogSound;
    use dive_invaders::platform::Key;
    use dive_invaders::renderer::RecordingRenderer;
    use dive_invaders::sim::GamePhase;
    use dive_invaders::{Config, Game, HighScores};

    /// 60 Hz frame clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ticks between autopilot direction changes
    const SWEEP_TICKS: u64 = 90;
    /// Ticks to wait on the game over screen before pressing Confirm
    const RESTART_DELAY_TICKS: u64 = 120;

    #[derive(Parser, Debug)]
    #[command(name = "dive-invaders")]
    #[command(about = "Run the formation shooter headless with a scripted autopilot")]
    pub struct Cli {
        /// Gameplay RNG seed
        #[arg(long, default_value_t = 0xD1CE)]
        pub seed: u64,
        /// Number of 60 Hz ticks to simulate
        #[arg(long, default_value_t = 60 * 120)]
        pub ticks: u64,
        /// JSON file with config overrides
        #[arg(long)]
        pub config: Option<PathBuf>,
        /// Sound cue volume (0.0 - 1.0)
        #[arg(long, default_value_t = 0.15)]
        pub volume: f32,
        /// Silence sound cues
        #[arg(long)]
        pub mute: bool,
    }

    /// Defaults, or the defaults overridden by a JSON file
    pub fn load_config(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        Config::from_json(&json).with_context(|| format!("bad config in {}", path.display()))
    }

    /// Sweep back and forth under the formation, firing whenever possible
    fn autopilot(tick: u64, game_over_for: u64) -> HashSet<Key> {
        let mut keys = HashSet::new();
        if game_over_for >= RESTART_DELAY_TICKS {
            keys.insert(Key::Confirm);
            return keys;
        }
        keys.insert(Key::Fire);
        if (tick / SWEEP_TICKS) % 2 == 0 {
            keys.insert(Key::MoveLeft);
        } else {
            keys.insert(Key::MoveRight);
        }
        keys
    }

    pub fn run(cli: Cli) -> Result<()> {
        let config = load_config(cli.config.as_deref())?;
        let mut sound = LogSound::new();
        sound.set_volume(cli.volume);
        sound.set_muted(cli.mute);

        let mut game = Game::new(config, cli.seed, sound, HighScores::new())
            .context("failed to start the session")?;
        let mut renderer = RecordingRenderer::default();
        let mut game_over_for = 0;
        let mut runs = 1;

        for tick in 0..cli.ticks {
            let keys = autopilot(tick, game_over_for);
            let was_over = game.phase() == GamePhase::GameOver;
            game.tick(tick as f64 * FRAME_MS, &keys);
            game.render(&mut renderer);

            match game.phase() {
                GamePhase::GameOver => game_over_for += 1,
                _ if was_over => {
                    game_over_for = 0;
                    runs += 1;
                    log::info!("Run {} started", runs);
                }
                _ => {}
            }
        }

        let (state, _, scores) = game.into_parts();
        log::info!(
            "Finished after {} ticks ({} frames drawn): wave {}, score {}, {} run(s)",
            cli.ticks,
            renderer.frames,
            state.wave,
            state.score,
            runs
        );
        for (rank, entry) in scores.entries.iter().enumerate() {
            println!("{:>2}. {:>8}  wave {}", rank + 1, entry.score, entry.wave);
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Dive Invaders (headless) starting...");
    headless::run(headless::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Embedders drive `Game` directly on the web; nothing to run here
}
