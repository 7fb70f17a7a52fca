//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Timers are stored
//! as wall-clock timestamps and compared against the tick's `now_ms`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::barrier::Barrier;
use super::bonus::BonusTarget;
use super::formation::Formation;
use super::member::FormationMember;
use super::player::Player;
use super::projectile::Projectile;
use super::starfield::StarField;
use super::targeting::DiveCap;
use crate::config::Config;
use crate::error::SimError;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Formation destroyed, waiting out the delay before the next wave
    WaveClear { since_ms: f64 },
    /// Player hit; ticks are no-ops until reset
    GameOver,
}

/// Things that happened during a tick, drained by the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired,
    MemberDestroyed,
    FormationPulse,
    BonusSpawned,
    /// Bonus target left the field or was shot down
    BonusDespawned,
    ScoreChanged(u64),
    WaveCleared { wave: u32 },
    WaveStarted { wave: u32 },
    GameOver { final_score: u64, wave: u32 },
    Reset,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG (fire selection, bonus side)
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Current wave number (1-based)
    pub wave: u32,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live formation members; destroyed members are removed
    pub members: Vec<FormationMember>,
    pub formation: Formation,
    pub player_shots: Vec<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub barriers: Vec<Barrier>,
    pub bonus: Option<BonusTarget>,
    /// Cosmetic background (own RNG stream)
    pub starfield: StarField,

    // === Difficulty ===
    pub fire_interval_ms: f64,
    pub anim_interval_ms: f64,
    pub dive_cap: DiveCap,

    // === Timers (wall-clock timestamps) ===
    pub wave_started_ms: f64,
    pub last_enemy_shot_ms: f64,
    pub last_dive_ms: f64,
    pub last_anim_ms: f64,
    pub last_bonus_spawn_ms: f64,

    /// Pending events for the loop
    pub events: Vec<GameEvent>,
}

/// Offset between the gameplay and cosmetic RNG seeds
const STARFIELD_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

impl GameState {
    /// Create a new session with the given config and seed, starting at t = 0
    pub fn new(config: Config, seed: u64) -> Result<Self, SimError> {
        Self::new_at(config, seed, 0.0)
    }

    /// Create a new session whose timers start at `now_ms`
    pub fn new_at(config: Config, seed: u64, now_ms: f64) -> Result<Self, SimError> {
        config.validate()?;

        let starfield = StarField::new(
            config.star_count,
            config.field_width,
            config.field_height,
            seed ^ STARFIELD_SEED_SALT,
        );

        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            wave: 1,
            score: 0,
            time_ticks: 0,
            player: Player::new(&config),
            members: Formation::spawn(&config),
            formation: Formation::default(),
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            barriers: Barrier::build_row(&config),
            bonus: None,
            starfield,
            fire_interval_ms: config.enemy_fire_interval_ms,
            anim_interval_ms: config.anim_interval_ms,
            dive_cap: DiveCap::default(),
            wave_started_ms: now_ms,
            last_enemy_shot_ms: now_ms,
            last_dive_ms: now_ms,
            last_anim_ms: now_ms,
            last_bonus_spawn_ms: now_ms,
            events: Vec::new(),
            config,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Members currently away from the formation
    pub fn diving_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_diving()).count()
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
