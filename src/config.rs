//! Simulation configuration
//!
//! Every tunable number the simulation uses. Defaults come from
//! [`crate::consts`]; an embedder may override any subset at construction,
//! either with struct update syntax or from a JSON document.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Named simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_fire_cooldown_ms: f64,

    // === Projectiles ===
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,

    // === Formation ===
    pub formation_rows: usize,
    pub formation_cols: usize,
    pub formation_spacing: f32,
    pub formation_origin_x: f32,
    pub formation_origin_y: f32,
    pub member_size: f32,
    pub formation_step: f32,
    pub formation_descent: f32,

    // === Dives ===
    pub dive_speed: f32,
    pub dive_steer_gain: f32,
    pub hover_steer_gain: f32,
    pub hover_steer_cap: f32,
    pub hover_duration_ms: f64,
    pub max_hover_altitude: f32,
    pub hover_barrier_margin: f32,
    pub diver_shot_interval_ms: f64,
    pub dive_interval_ms: f64,

    // === Enemy fire & animation ===
    pub enemy_fire_interval_ms: f64,
    pub enemy_fire_interval_min_ms: f64,
    pub aimed_shot_probability: f64,
    pub anim_interval_ms: f64,
    pub anim_interval_min_ms: f64,

    // === Waves ===
    pub fire_grace_ms: f64,
    pub dive_grace_ms: f64,
    pub wave_clear_delay_ms: f64,
    pub difficulty_decay: f64,

    // === Barriers ===
    pub barrier_count: usize,
    pub barrier_width: f32,
    pub barrier_height: f32,
    pub barrier_bottom_offset: f32,
    pub segment_size: f32,
    pub segment_health: u8,

    // === Bonus target ===
    pub bonus_width: f32,
    pub bonus_height: f32,
    pub bonus_y: f32,
    pub bonus_speed: f32,
    pub bonus_points: u64,
    pub bonus_spawn_interval_ms: f64,
    pub bonus_offscreen_margin: f32,

    // === Scoring & cosmetics ===
    pub kill_points: u64,
    pub star_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_fire_cooldown_ms: PLAYER_FIRE_COOLDOWN_MS,

            projectile_width: PROJECTILE_WIDTH,
            projectile_height: PROJECTILE_HEIGHT,
            player_projectile_speed: PLAYER_PROJECTILE_SPEED,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,

            formation_rows: FORMATION_ROWS,
            formation_cols: FORMATION_COLS,
            formation_spacing: FORMATION_SPACING,
            formation_origin_x: FORMATION_ORIGIN_X,
            formation_origin_y: FORMATION_ORIGIN_Y,
            member_size: MEMBER_SIZE,
            formation_step: FORMATION_STEP,
            formation_descent: FORMATION_DESCENT,

            dive_speed: DIVE_SPEED,
            dive_steer_gain: DIVE_STEER_GAIN,
            hover_steer_gain: HOVER_STEER_GAIN,
            hover_steer_cap: HOVER_STEER_CAP,
            hover_duration_ms: HOVER_DURATION_MS,
            max_hover_altitude: MAX_HOVER_ALTITUDE,
            hover_barrier_margin: HOVER_BARRIER_MARGIN,
            diver_shot_interval_ms: DIVER_SHOT_INTERVAL_MS,
            dive_interval_ms: DIVE_INTERVAL_MS,

            enemy_fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,
            enemy_fire_interval_min_ms: ENEMY_FIRE_INTERVAL_MIN_MS,
            aimed_shot_probability: AIMED_SHOT_PROBABILITY,
            anim_interval_ms: ANIM_INTERVAL_MS,
            anim_interval_min_ms: ANIM_INTERVAL_MIN_MS,

            fire_grace_ms: FIRE_GRACE_MS,
            dive_grace_ms: DIVE_GRACE_MS,
            wave_clear_delay_ms: WAVE_CLEAR_DELAY_MS,
            difficulty_decay: DIFFICULTY_DECAY,

            barrier_count: BARRIER_COUNT,
            barrier_width: BARRIER_WIDTH,
            barrier_height: BARRIER_HEIGHT,
            barrier_bottom_offset: BARRIER_BOTTOM_OFFSET,
            segment_size: SEGMENT_SIZE,
            segment_health: SEGMENT_HEALTH,

            bonus_width: BONUS_WIDTH,
            bonus_height: BONUS_HEIGHT,
            bonus_y: BONUS_Y,
            bonus_speed: BONUS_SPEED,
            bonus_points: BONUS_POINTS,
            bonus_spawn_interval_ms: BONUS_SPAWN_INTERVAL_MS,
            bonus_offscreen_margin: BONUS_OFFSCREEN_MARGIN,

            kill_points: KILL_POINTS,
            star_count: STAR_COUNT,
        }
    }
}

fn require_positive_f32(field: &str, value: f32) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(field, format!("must be positive, got {value}")))
    }
}

fn require_positive_f64(field: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(field, format!("must be positive, got {value}")))
    }
}

fn require_nonzero(field: &str, value: usize) -> Result<(), SimError> {
    if value > 0 {
        Ok(())
    } else {
        Err(SimError::invalid_config(field, "must be at least 1"))
    }
}

impl Config {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    ///
    /// Missing keys keep their default values. The result is validated.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| SimError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject any configuration the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let dimensions = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("projectile_width", self.projectile_width),
            ("projectile_height", self.projectile_height),
            ("formation_spacing", self.formation_spacing),
            ("member_size", self.member_size),
            ("barrier_width", self.barrier_width),
            ("barrier_height", self.barrier_height),
            ("segment_size", self.segment_size),
            ("bonus_width", self.bonus_width),
            ("bonus_height", self.bonus_height),
        ];
        let speeds = [
            ("player_speed", self.player_speed),
            ("player_projectile_speed", self.player_projectile_speed),
            ("enemy_projectile_speed", self.enemy_projectile_speed),
            ("formation_step", self.formation_step),
            ("formation_descent", self.formation_descent),
            ("dive_speed", self.dive_speed),
            ("dive_steer_gain", self.dive_steer_gain),
            ("hover_steer_gain", self.hover_steer_gain),
            ("hover_steer_cap", self.hover_steer_cap),
            ("bonus_speed", self.bonus_speed),
        ];
        let intervals = [
            ("player_fire_cooldown_ms", self.player_fire_cooldown_ms),
            ("hover_duration_ms", self.hover_duration_ms),
            ("diver_shot_interval_ms", self.diver_shot_interval_ms),
            ("dive_interval_ms", self.dive_interval_ms),
            ("enemy_fire_interval_ms", self.enemy_fire_interval_ms),
            ("enemy_fire_interval_min_ms", self.enemy_fire_interval_min_ms),
            ("anim_interval_ms", self.anim_interval_ms),
            ("anim_interval_min_ms", self.anim_interval_min_ms),
            ("fire_grace_ms", self.fire_grace_ms),
            ("dive_grace_ms", self.dive_grace_ms),
            ("wave_clear_delay_ms", self.wave_clear_delay_ms),
            ("bonus_spawn_interval_ms", self.bonus_spawn_interval_ms),
        ];

        for (field, value) in dimensions.into_iter().chain(speeds) {
            require_positive_f32(field, value)?;
        }
        for (field, value) in intervals {
            require_positive_f64(field, value)?;
        }

        require_nonzero("formation_rows", self.formation_rows)?;
        require_nonzero("formation_cols", self.formation_cols)?;
        if self.segment_health == 0 {
            return Err(SimError::invalid_config("segment_health", "must be at least 1"));
        }
        if !(self.difficulty_decay > 0.0 && self.difficulty_decay <= 1.0) {
            return Err(SimError::invalid_config(
                "difficulty_decay",
                format!("must be in (0, 1], got {}", self.difficulty_decay),
            ));
        }
        if !(0.0..=1.0).contains(&self.aimed_shot_probability) {
            return Err(SimError::invalid_config(
                "aimed_shot_probability",
                format!("must be in [0, 1], got {}", self.aimed_shot_probability),
            ));
        }
        if self.member_size > self.field_width {
            return Err(SimError::invalid_config(
                "member_size",
                "formation members must fit inside the field",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let config = Config {
            dive_speed: 0.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfiguration { ref field, .. } if field == "dive_speed"
        ));
    }

    #[test]
    fn test_rejects_negative_interval() {
        let config = Config {
            hover_duration_ms: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = Config {
            formation_cols: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_override() {
        let config = Config::from_json(r#"{ "field_width": 1024.0, "kill_points": 25 }"#).unwrap();
        assert_eq!(config.field_width, 1024.0);
        assert_eq!(config.kill_points, 25);
        assert_eq!(config.dive_speed, DIVE_SPEED);
    }

    #[test]
    fn test_json_override_is_validated() {
        assert!(Config::from_json(r#"{ "player_speed": -3.0 }"#).is_err());
        assert!(Config::from_json("not json").is_err());
    }
}
