//! Dive Invaders - A formation shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, formation, dives, collisions, waves)
//! - `game`: Frame-driven loop wiring the simulation to its collaborators
//! - `renderer`: Draw command generation for an external renderer
//! - `audio`: Sound cue boundary
//! - `platform`: Input abstraction and per-tick context
//! - `config`: Named constants an embedder may override

pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::Config;
pub use error::SimError;
pub use game::Game;
pub use highscores::{HighScores, ScoreSink};

/// Game configuration constants
///
/// Times are milliseconds, distances are pixels, speeds are pixels per tick.
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_FIRE_COOLDOWN_MS: f64 = 250.0;

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 7.0;
    pub const ENEMY_PROJECTILE_SPEED: f32 = 5.0;

    /// Formation grid
    pub const FORMATION_ROWS: usize = 5;
    pub const FORMATION_COLS: usize = 10;
    pub const FORMATION_SPACING: f32 = 60.0;
    pub const FORMATION_ORIGIN_X: f32 = 50.0;
    pub const FORMATION_ORIGIN_Y: f32 = 50.0;
    pub const MEMBER_SIZE: f32 = 30.0;
    /// Lateral lock-step movement per tick
    pub const FORMATION_STEP: f32 = 0.5;
    /// Descent applied when the formation hits an edge
    pub const FORMATION_DESCENT: f32 = 5.0;

    /// Dive behaviour
    pub const DIVE_SPEED: f32 = 3.0;
    pub const DIVE_STEER_GAIN: f32 = 0.1;
    pub const HOVER_STEER_GAIN: f32 = 0.05;
    pub const HOVER_STEER_CAP: f32 = 2.0;
    pub const HOVER_DURATION_MS: f64 = 1500.0;
    /// Lowest point (largest y) a diver hovers at
    pub const MAX_HOVER_ALTITUDE: f32 = 450.0;
    /// Clearance kept above the highest barrier segment
    pub const HOVER_BARRIER_MARGIN: f32 = 50.0;
    pub const DIVER_SHOT_INTERVAL_MS: f64 = 800.0;
    pub const DIVE_INTERVAL_MS: f64 = 5000.0;

    /// Enemy fire
    pub const ENEMY_FIRE_INTERVAL_MS: f64 = 1000.0;
    pub const ENEMY_FIRE_INTERVAL_MIN_MS: f64 = 500.0;
    pub const AIMED_SHOT_PROBABILITY: f64 = 0.7;

    /// Formation animation
    pub const ANIM_INTERVAL_MS: f64 = 500.0;
    pub const ANIM_INTERVAL_MIN_MS: f64 = 200.0;

    /// Grace periods after a wave starts
    pub const FIRE_GRACE_MS: f64 = 2000.0;
    pub const DIVE_GRACE_MS: f64 = 3000.0;

    /// Wave progression
    pub const WAVE_CLEAR_DELAY_MS: f64 = 1000.0;
    pub const DIFFICULTY_DECAY: f64 = 0.9;

    /// Barriers
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_WIDTH: f32 = 80.0;
    pub const BARRIER_HEIGHT: f32 = 60.0;
    /// Distance of the barrier tops from the bottom of the field
    pub const BARRIER_BOTTOM_OFFSET: f32 = 150.0;
    pub const SEGMENT_SIZE: f32 = 10.0;
    pub const SEGMENT_HEALTH: u8 = 2;

    /// Bonus target
    pub const BONUS_WIDTH: f32 = 60.0;
    pub const BONUS_HEIGHT: f32 = 15.0;
    pub const BONUS_Y: f32 = 30.0;
    pub const BONUS_SPEED: f32 = 2.0;
    pub const BONUS_POINTS: u64 = 1000;
    pub const BONUS_SPAWN_INTERVAL_MS: f64 = 20000.0;
    /// How far outside the field the bonus enters and leaves
    pub const BONUS_OFFSCREEN_MARGIN: f32 = 60.0;

    /// Score per formation member destroyed
    pub const KILL_POINTS: u64 = 10;

    /// Cosmetic starfield
    pub const STAR_COUNT: usize = 100;
}

/// Sign of a value as -1, 0 or 1 (unlike `f32::signum`, zero stays zero)
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Move `from` toward `to` by a fraction of the gap, never more than `cap`
#[inline]
pub fn steer_toward(from: f32, to: f32, gain: f32, cap: f32) -> f32 {
    let gap = to - from;
    from + sign(gap) * (gap.abs() * gain).min(cap)
}
