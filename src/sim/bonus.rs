use serde::{Deserialize, Serialize};

use super::entity::{Body, HasBody};
use crate::config::Config;

/// High-value target crossing the top of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusTarget {
    pub body: Body,
    /// +1 travels right, -1 travels left
    pub direction: f32,
    pub speed: f32,
    pub points: u64,
}

impl HasBody for BonusTarget {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl BonusTarget {
    /// Enter from outside the edge opposite to the travel direction
    pub fn spawn(direction: f32, config: &Config) -> Self {
        let x = if direction > 0.0 {
            -config.bonus_offscreen_margin
        } else {
            config.field_width + config.bonus_offscreen_margin - config.bonus_width
        };
        Self {
            body: Body::new(x, config.bonus_y, config.bonus_width, config.bonus_height),
            direction,
            speed: config.bonus_speed,
            points: config.bonus_points,
        }
    }

    pub fn advance(&mut self) {
        self.body.pos.x += self.direction * self.speed;
    }

    /// Past the far edge by the offscreen margin
    pub fn is_offscreen(&self, config: &Config) -> bool {
        let margin = config.bonus_offscreen_margin;
        if self.direction > 0.0 {
            self.body.left() > config.field_width + margin
        } else {
            self.body.right() < -margin
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crosses_field_both_ways() {
        let config = Config::default();
        for direction in [1.0, -1.0] {
            let mut bonus = BonusTarget::spawn(direction, &config);
            assert!(!bonus.is_offscreen(&config));
            let mut ticks = 0;
            while !bonus.is_offscreen(&config) {
                bonus.advance();
                ticks += 1;
            }
            // Field plus both margins at 2 px per tick
            assert_eq!(ticks, 461);
        }
    }
}
