use serde::{Deserialize, Serialize};

use super::entity::{Body, HasBody};
use super::projectile::{Owner, Projectile};
use crate::config::Config;

/// The player's cannon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub speed: f32,
    /// Earliest time the next shot may be fired
    pub fire_ready_at_ms: f64,
}

impl HasBody for Player {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl Player {
    /// Centred horizontally, resting on the bottom of the field
    pub fn new(config: &Config) -> Self {
        Self {
            body: Body::new(
                (config.field_width - config.player_width) / 2.0,
                config.field_height - config.player_height,
                config.player_width,
                config.player_height,
            ),
            speed: config.player_speed,
            fire_ready_at_ms: 0.0,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.body.center().x
    }

    /// Move by `direction` (-1, 0, 1) steps, confined to the field
    pub fn move_by(&mut self, direction: f32, field_width: f32) {
        self.body.pos.x += direction * self.speed;
        self.body.clamp_x(field_width);
    }

    /// Fire upward if the cooldown has elapsed
    pub fn try_fire(&mut self, now_ms: f64, config: &Config) -> Option<Projectile> {
        if now_ms < self.fire_ready_at_ms {
            return None;
        }
        self.fire_ready_at_ms = now_ms + config.player_fire_cooldown_ms;
        Some(Projectile::new(
            Owner::Player,
            self.center_x(),
            self.body.top(),
            config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_centred() {
        let config = Config::default();
        let player = Player::new(&config);
        assert_eq!(player.center_x(), 400.0);
        assert_eq!(player.body.bottom(), config.field_height);
    }

    #[test]
    fn test_confined_to_field() {
        let config = Config::default();
        let mut player = Player::new(&config);
        for _ in 0..200 {
            player.move_by(-1.0, config.field_width);
        }
        assert_eq!(player.body.left(), 0.0);
        for _ in 0..200 {
            player.move_by(1.0, config.field_width);
        }
        assert_eq!(player.body.right(), config.field_width);
    }

    #[test]
    fn test_fire_cooldown() {
        let config = Config::default();
        let mut player = Player::new(&config);
        assert!(player.try_fire(0.0, &config).is_some());
        assert!(player.try_fire(100.0, &config).is_none());
        assert!(player.try_fire(249.0, &config).is_none());
        let shot = player.try_fire(250.0, &config).unwrap();
        assert_eq!(shot.owner, Owner::Player);
        assert_eq!(shot.body.center().x, player.center_x());
    }
}
