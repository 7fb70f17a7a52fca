//! Formation members and their dive state machine
//!
//! ```text
//! InFormation --start_dive--> Diving --reach target--> Hovering
//!      ^                                                  |
//!      +---- snap to anchor ---- Returning <-- hover over-+
//! ```
//!
//! While away from the formation a member keeps its anchor in sync with the
//! lock-step movement, so it returns to where its slot is *now*.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, HasBody};
use super::projectile::{Owner, Projectile};
use crate::config::Config;
use crate::error::SimError;
use crate::platform::TickContext;
use crate::steer_toward;

/// Dive sub-state of a formation member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DiveState {
    /// Moving in lock-step with the formation
    InFormation,
    /// Descending toward the hover altitude while tracking the player
    Diving,
    /// Holding altitude and firing, since the given timestamp
    Hovering { since_ms: f64 },
    /// Flying back to the live anchor
    Returning,
}

/// An enemy unit of the formation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationMember {
    pub body: Body,
    /// Sprite variant 1-3 (visual row)
    pub sprite_type: u8,
    /// Animation frame 0/1
    pub frame: u8,
    /// Mirror of the formation direction while in formation
    pub direction: f32,
    pub state: DiveState,
    /// Formation slot position, kept live while away
    pub anchor: Vec2,
    /// Altitude (y) the dive descends to
    pub target_y: f32,
    pub last_shot_ms: f64,
    pub dive_started_ms: Option<f64>,
    /// Lateral formation movement accumulated since the dive started
    pub offset: f32,
}

impl HasBody for FormationMember {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl FormationMember {
    pub fn new(x: f32, y: f32, sprite_type: u8, size: f32) -> Self {
        Self {
            body: Body::new(x, y, size, size),
            sprite_type,
            frame: 0,
            direction: 1.0,
            state: DiveState::InFormation,
            anchor: Vec2::new(x, y),
            target_y: 0.0,
            last_shot_ms: 0.0,
            dive_started_ms: None,
            offset: 0.0,
        }
    }

    /// Sprite variant for a grid row: rows pair up, capped at 3
    pub fn sprite_for_row(row: usize) -> u8 {
        (row / 2 + 1).min(3) as u8
    }

    #[inline]
    pub fn in_formation(&self) -> bool {
        self.state == DiveState::InFormation
    }

    #[inline]
    pub fn is_diving(&self) -> bool {
        !self.in_formation()
    }

    pub fn toggle_frame(&mut self) {
        self.frame ^= 1;
    }

    /// Follow the formation's lock-step movement by `delta`.
    ///
    /// Members in formation move; members away only carry the delta in their
    /// anchor (and the lateral part in their offset).
    pub fn follow_formation(&mut self, delta: Vec2) {
        if self.in_formation() {
            self.body.pos += delta;
            self.anchor = self.body.pos;
        } else {
            self.anchor += delta;
            self.offset += delta.x;
        }
    }

    /// Leave the formation. Only legal from `InFormation`.
    pub fn start_dive(&mut self, now_ms: f64, target_y: f32) -> Result<(), SimError> {
        if !self.in_formation() {
            return Err(SimError::invariant(format!(
                "start_dive from {:?}",
                self.state
            )));
        }
        self.state = DiveState::Diving;
        self.target_y = target_y;
        self.dive_started_ms = Some(now_ms);
        self.last_shot_ms = now_ms;
        self.anchor = self.body.pos;
        self.offset = 0.0;
        Ok(())
    }

    /// Advance the dive state machine by one tick.
    ///
    /// Returns true when a hovering member is ready to fire; the caller spawns
    /// the projectile with [`FormationMember::fire`].
    pub fn update(
        &mut self,
        ctx: &TickContext,
        player_center_x: f32,
        shared_direction: f32,
        config: &Config,
    ) -> bool {
        match self.state {
            DiveState::InFormation => {
                self.direction = shared_direction;
                self.anchor = self.body.pos;
                false
            }
            DiveState::Diving => {
                if self.body.pos.y < self.target_y {
                    self.body.pos.y += config.dive_speed;
                    self.track(
                        player_center_x,
                        config.dive_steer_gain,
                        config.dive_speed,
                    );
                }
                if self.body.pos.y >= self.target_y {
                    self.state = DiveState::Hovering {
                        since_ms: ctx.now_ms,
                    };
                }
                false
            }
            DiveState::Hovering { since_ms } => {
                if ctx.since(since_ms) < config.hover_duration_ms {
                    self.track(
                        player_center_x,
                        config.hover_steer_gain,
                        config.hover_steer_cap,
                    );
                    ctx.since(self.last_shot_ms) > config.diver_shot_interval_ms
                } else {
                    self.state = DiveState::Returning;
                    false
                }
            }
            DiveState::Returning => {
                self.fly_home(shared_direction, config.dive_speed);
                false
            }
        }
    }

    /// Steer the member's centre toward the player's centre
    fn track(&mut self, player_center_x: f32, gain: f32, cap: f32) {
        let center = self.body.center().x;
        self.body.pos.x += steer_toward(center, player_center_x, gain, cap) - center;
    }

    fn fly_home(&mut self, shared_direction: f32, dive_speed: f32) {
        let to_anchor = self.anchor - self.body.pos;
        let distance = to_anchor.length();

        if distance < dive_speed {
            self.body.pos = self.anchor;
            self.state = DiveState::InFormation;
            self.dive_started_ms = None;
            self.offset = 0.0;
            self.direction = shared_direction;
            return;
        }

        // Progress measured against the span of the original dive
        let reference = Vec2::new(
            self.body.pos.x - self.anchor.x,
            self.target_y - self.anchor.y,
        )
        .length();
        let progress = if reference > f32::EPSILON {
            (1.0 - distance / reference).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let speed = dive_speed * (1.0 + progress * 2.0);

        // Never overshoot the anchor
        self.body.pos += to_anchor / distance * speed.min(distance);
    }

    /// Spawn a downward projectile from the member's bottom centre
    pub fn fire(&mut self, now_ms: f64, config: &Config) -> Projectile {
        self.last_shot_ms = now_ms;
        Projectile::new(
            Owner::Enemy,
            self.body.center().x,
            self.body.bottom(),
            config,
        )
    }
}
