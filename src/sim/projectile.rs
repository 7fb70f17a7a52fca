use serde::{Deserialize, Serialize};

use super::entity::{Body, HasBody};
use crate::config::Config;

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A bullet travelling straight up (player) or down (enemy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub owner: Owner,
    /// Signed vertical speed per tick
    pub vy: f32,
}

impl Projectile {
    /// Spawn a projectile centred horizontally on `center_x`
    pub fn new(owner: Owner, center_x: f32, y: f32, config: &Config) -> Self {
        let vy = match owner {
            Owner::Player => -config.player_projectile_speed,
            Owner::Enemy => config.enemy_projectile_speed,
        };
        Self {
            body: Body::new(
                center_x - config.projectile_width / 2.0,
                y,
                config.projectile_width,
                config.projectile_height,
            ),
            owner,
            vy,
        }
    }

    pub fn advance(&mut self) {
        self.body.pos.y += self.vy;
    }

    pub fn is_offscreen(&self, field_height: f32) -> bool {
        self.body.pos.y < 0.0 || self.body.pos.y > field_height
    }
}

impl HasBody for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }
}
