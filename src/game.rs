//! Frame-driven game loop
//!
//! [`Game`] owns the simulation state and its collaborators. Each frame the
//! embedder calls [`Game::tick`] with the current time and key state, then
//! [`Game::render`]. Events raised by the simulation are forwarded to the
//! sound service and the score sink after every tick.

use crate::audio::{BonusSoundHandle, SoundService};
use crate::config::Config;
use crate::error::SimError;
use crate::highscores::ScoreSink;
use crate::platform::{InputSnapshot, KeyState, TickContext};
use crate::renderer::{Renderer, build_frame};
use crate::sim::state::{GameEvent, GamePhase, GameState};
use crate::sim::{tick, wave};

/// Game instance holding the state and its collaborators
pub struct Game<S: SoundService, K: ScoreSink> {
    state: GameState,
    sound: S,
    scores: K,
    /// Looping bonus target sound, while one is playing
    bonus_sound: Option<S::Handle>,
    reset_requested: bool,
}

impl<S: SoundService, K: ScoreSink> Game<S, K> {
    /// Start a session. Fails without side effects if `config` is invalid.
    pub fn new(config: Config, seed: u64, sound: S, scores: K) -> Result<Self, SimError> {
        let state = GameState::new(config, seed)?;
        log::info!("Game created (seed {seed})");
        Ok(Self {
            state,
            sound,
            scores,
            bonus_sound: None,
            reset_requested: false,
        })
    }

    /// Run one simulation tick at `now_ms`.
    ///
    /// A pending reset (from [`Game::request_reset`], or `Confirm` pressed
    /// after game over) is applied first, with its timers starting at `now_ms`.
    pub fn tick(&mut self, now_ms: f64, keys: &dyn KeyState) {
        let input = InputSnapshot::sample(keys);
        if self.reset_requested || (self.state.is_game_over() && input.confirm) {
            self.reset_requested = false;
            if let Err(e) = wave::reset(&mut self.state, now_ms) {
                log::error!("Reset failed: {}", e);
            }
        }

        let ctx = TickContext::new(now_ms, input);
        tick::tick(&mut self.state, &ctx);
        self.dispatch_events();
    }

    /// Describe the current frame to `renderer`
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(&build_frame(&self.state));
    }

    /// Reinitialize the session on the next tick
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    fn stop_bonus_sound(&mut self) {
        if let Some(mut handle) = self.bonus_sound.take() {
            handle.stop();
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::PlayerFired => self.sound.on_player_fire(),
                GameEvent::EnemyFired => self.sound.on_enemy_fire(),
                GameEvent::MemberDestroyed => self.sound.on_explosion(),
                GameEvent::FormationPulse => self.sound.on_formation_pulse(),
                GameEvent::BonusSpawned => {
                    self.stop_bonus_sound();
                    self.bonus_sound = Some(self.sound.on_bonus_spawn());
                }
                GameEvent::BonusDespawned | GameEvent::Reset => self.stop_bonus_sound(),
                GameEvent::ScoreChanged(score) => self.scores.score_changed(score),
                GameEvent::GameOver { final_score, wave } => {
                    self.stop_bonus_sound();
                    self.scores.game_over(final_score, wave);
                }
                GameEvent::WaveCleared { .. } | GameEvent::WaveStarted { .. } => {}
            }
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn wave(&self) -> u32 {
        self.state.wave
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn scores(&self) -> &K {
        &self.scores
    }

    /// Hand back the collaborators (e.g. to persist the leaderboard)
    pub fn into_parts(self) -> (GameState, S, K) {
        (self.state, self.sound, self.scores)
    }
}
