//! Formation controller
//!
//! Lock-step lateral movement with edge-triggered descent. Only members in
//! formation take part in the edge test and move; members away on a dive
//! carry the same delta in their anchor.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::member::FormationMember;
use crate::config::Config;

/// What the formation did this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormationStep {
    /// No member in formation, nothing moved
    Idle,
    /// Lateral move by the given delta
    Shifted(f32),
    /// Hit an edge: direction flipped and the formation descended
    Flipped,
}

/// Shared formation state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    /// Shared horizontal direction, +1 or -1. Persists while every member is
    /// away so returning divers pick up the last shared direction.
    pub direction: f32,
}

impl Default for Formation {
    fn default() -> Self {
        Self { direction: 1.0 }
    }
}

impl Formation {
    /// Build a fresh grid of members, row-major from the top-left slot
    pub fn spawn(config: &Config) -> Vec<FormationMember> {
        let mut members = Vec::with_capacity(config.formation_rows * config.formation_cols);
        for row in 0..config.formation_rows {
            for col in 0..config.formation_cols {
                members.push(FormationMember::new(
                    config.formation_origin_x + col as f32 * config.formation_spacing,
                    config.formation_origin_y + row as f32 * config.formation_spacing,
                    FormationMember::sprite_for_row(row),
                    config.member_size,
                ));
            }
        }
        members
    }

    /// Canonical direction for a new wave
    pub fn reset(&mut self) {
        self.direction = 1.0;
    }

    /// Advance the lock-step movement by one tick
    pub fn step(&mut self, members: &mut [FormationMember], config: &Config) -> FormationStep {
        let dx = config.formation_step * self.direction;

        let mut in_formation = members.iter().filter(|m| m.in_formation()).peekable();
        if in_formation.peek().is_none() {
            return FormationStep::Idle;
        }
        let hits_edge = in_formation.any(|m| m.body.would_leave_x(dx, config.field_width));

        let (delta, step) = if hits_edge {
            self.direction = -self.direction;
            (Vec2::new(0.0, config.formation_descent), FormationStep::Flipped)
        } else {
            (Vec2::new(dx, 0.0), FormationStep::Shifted(dx))
        };

        for member in members.iter_mut() {
            member.follow_formation(delta);
            if member.in_formation() {
                member.direction = self.direction;
            }
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_grid() {
        let config = Config::default();
        let members = Formation::spawn(&config);
        assert_eq!(members.len(), 50);
        assert_eq!(members[0].body.pos, Vec2::new(50.0, 50.0));
        assert_eq!(members[9].body.pos, Vec2::new(590.0, 50.0));
        assert_eq!(members[49].body.pos, Vec2::new(590.0, 290.0));
        assert_eq!(members[0].sprite_type, 1);
        assert_eq!(members[25].sprite_type, 2);
        assert_eq!(members[45].sprite_type, 3);
    }

    #[test]
    fn test_shift_moves_formation_and_anchors() {
        let config = Config::default();
        let mut formation = Formation::default();
        let mut members = Formation::spawn(&config);
        members[3].start_dive(0.0, 400.0).unwrap();
        members[3].body.pos = Vec2::new(400.0, 300.0);

        let step = formation.step(&mut members, &config);
        assert_eq!(step, FormationStep::Shifted(0.5));
        assert_eq!(members[0].body.pos, Vec2::new(50.5, 50.0));
        // The diver stays put but its anchor follows
        assert_eq!(members[3].body.pos, Vec2::new(400.0, 300.0));
        assert_eq!(members[3].anchor, Vec2::new(230.5, 50.0));
        assert_eq!(members[3].offset, 0.5);
    }

    #[test]
    fn test_flip_at_right_edge() {
        let config = Config::default();
        let mut formation = Formation::default();
        let mut members = vec![FormationMember::new(769.8, 50.0, 1, 30.0)];

        let step = formation.step(&mut members, &config);
        assert_eq!(step, FormationStep::Flipped);
        assert_eq!(formation.direction, -1.0);
        assert_eq!(members[0].body.pos, Vec2::new(769.8, 55.0));
        assert_eq!(members[0].direction, -1.0);
    }

    #[test]
    fn test_flip_descends_diver_anchor() {
        use crate::platform::{InputSnapshot, TickContext};
        use crate::sim::member::DiveState;

        let config = Config::default();
        let mut formation = Formation::default();
        let mut members = vec![
            FormationMember::new(769.8, 50.0, 1, 30.0),
            FormationMember::new(100.0, 50.0, 1, 30.0),
        ];
        members[1].start_dive(0.0, 400.0).unwrap();
        members[1].body.pos = Vec2::new(300.0, 300.0);

        assert_eq!(formation.step(&mut members, &config), FormationStep::Flipped);
        assert_eq!(members[1].body.pos, Vec2::new(300.0, 300.0));
        assert_eq!(members[1].anchor, Vec2::new(100.0, 50.0 + config.formation_descent));
        assert_eq!(members[1].offset, 0.0);

        // Home is the descended slot
        members[1].state = DiveState::Returning;
        let mut ticks = 0;
        while members[1].state != DiveState::InFormation {
            let ctx = TickContext::new(2000.0 + ticks as f64 * 16.0, InputSnapshot::default());
            members[1].update(&ctx, 115.0, formation.direction, &config);
            ticks += 1;
            assert!(ticks < 500, "diver never returned");
        }
        assert_eq!(members[1].body.pos, Vec2::new(100.0, 55.0));
        assert_eq!(members[1].direction, -1.0);
    }

    #[test]
    fn test_divers_ignored_by_edge_test() {
        let config = Config::default();
        let mut formation = Formation::default();
        let mut members = vec![
            FormationMember::new(100.0, 50.0, 1, 30.0),
            FormationMember::new(790.0, 300.0, 1, 30.0),
        ];
        members[1].start_dive(0.0, 400.0).unwrap();

        assert_eq!(formation.step(&mut members, &config), FormationStep::Shifted(0.5));
        assert_eq!(formation.direction, 1.0);
    }

    #[test]
    fn test_all_diving_is_idle() {
        let config = Config::default();
        let mut formation = Formation { direction: -1.0 };
        let mut members = vec![FormationMember::new(100.0, 50.0, 1, 30.0)];
        members[0].start_dive(0.0, 400.0).unwrap();

        assert_eq!(formation.step(&mut members, &config), FormationStep::Idle);
        assert_eq!(formation.direction, -1.0);
        assert_eq!(formation.step(&mut [], &config), FormationStep::Idle);
    }

    proptest! {
        #[test]
        fn prop_flip_exactly_at_edge(
            xs in prop::collection::vec(0.0f32..770.0, 1..20),
            direction in prop::sample::select(vec![1.0f32, -1.0]),
        ) {
            let config = Config::default();
            let mut formation = Formation { direction };
            let mut members: Vec<_> = xs
                .iter()
                .enumerate()
                .map(|(i, &x)| FormationMember::new(x, 50.0 + i as f32, 1, 30.0))
                .collect();
            let before: Vec<Vec2> = members.iter().map(|m| m.body.pos).collect();
            let dx = config.formation_step * direction;
            let expect_flip = members
                .iter()
                .any(|m| m.body.pos.x + dx < 0.0 || m.body.pos.x + dx + 30.0 > config.field_width);

            let step = formation.step(&mut members, &config);

            if expect_flip {
                prop_assert_eq!(step, FormationStep::Flipped);
                prop_assert_eq!(formation.direction, -direction);
                for (m, p) in members.iter().zip(&before) {
                    prop_assert_eq!(m.body.pos.x, p.x);
                    prop_assert_eq!(m.body.pos.y, p.y + config.formation_descent);
                }
            } else {
                prop_assert_eq!(step, FormationStep::Shifted(dx));
                for (m, p) in members.iter().zip(&before) {
                    prop_assert_eq!(m.body.pos.x, p.x + dx);
                    prop_assert_eq!(m.body.pos.y, p.y);
                }
            }
        }
    }
}
