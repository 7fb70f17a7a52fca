//! Frame building: turns the current state into draw commands
//!
//! Draw order: background, stars, player, members, barriers, projectiles,
//! bonus target.

use glam::Vec2;

use super::sprites::{self, SPRITE_COLUMNS};
use super::{BLACK, Color, DrawCommand, ENEMY_SHOT_RED, GREEN, WHITE, YELLOW};
use crate::sim::barrier::Segment;
use crate::sim::bonus::BonusTarget;
use crate::sim::entity::Body;
use crate::sim::state::GameState;

fn rect(body: &Body, color: Color) -> DrawCommand {
    DrawCommand::Rect {
        pos: body.pos,
        size: body.size,
        color,
    }
}

/// Segment colour darkens with damage
pub fn segment_color(segment: &Segment, max_health: u8) -> Color {
    let green = segment.health as f32 / max_health.max(1) as f32;
    [0.0, green.clamp(0.0, 1.0), 0.0, 1.0]
}

/// Saucer body plus dome
fn bonus_shapes(bonus: &BonusTarget) -> [DrawCommand; 2] {
    let body = &bonus.body;
    let x = body.center().x;
    [
        DrawCommand::Ellipse {
            center: Vec2::new(x, body.top() + 10.0),
            radii: Vec2::new(body.size.x / 2.0, body.size.y / 3.0),
            color: YELLOW,
        },
        DrawCommand::Ellipse {
            center: Vec2::new(x, body.top()),
            radii: Vec2::new(body.size.x / 3.0, body.size.y / 2.0),
            color: YELLOW,
        },
    ]
}

/// Describe the whole frame
pub fn build_frame(state: &GameState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(
        1 + state.starfield.stars.len()
            + 1
            + state.members.len()
            + state.barriers.iter().map(|b| b.segments.len()).sum::<usize>()
            + state.player_shots.len()
            + state.enemy_shots.len()
            + 2,
    );

    commands.push(DrawCommand::Clear { color: BLACK });

    for star in &state.starfield.stars {
        commands.push(DrawCommand::Ellipse {
            center: Vec2::new(star.x, star.y),
            radii: Vec2::splat(star.size),
            color: WHITE,
        });
    }

    commands.push(rect(&state.player.body, GREEN));

    for member in &state.members {
        commands.push(DrawCommand::Sprite {
            pos: member.body.pos,
            pixel_size: member.body.size.x / SPRITE_COLUMNS as f32,
            pattern: sprites::pattern(member.sprite_type, member.frame),
            color: WHITE,
        });
    }

    let max_health = state.config.segment_health;
    for segment in state.barriers.iter().flat_map(|b| &b.segments) {
        commands.push(rect(&segment.body, segment_color(segment, max_health)));
    }

    for shot in &state.player_shots {
        commands.push(rect(&shot.body, WHITE));
    }
    for shot in &state.enemy_shots {
        commands.push(rect(&shot.body, ENEMY_SHOT_RED));
    }

    if let Some(bonus) = &state.bonus {
        commands.extend(bonus_shapes(bonus));
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_fresh_frame_contents() {
        let state = GameState::new(Config::default(), 5).unwrap();
        let frame = build_frame(&state);

        assert_eq!(frame[0], DrawCommand::Clear { color: BLACK });
        let sprites = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { .. }))
            .count();
        assert_eq!(sprites, 50);
        let rects = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .count();
        // Player plus 4 barriers of 42 segments
        assert_eq!(rects, 1 + 4 * 42);
        let ellipses = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
            .count();
        assert_eq!(ellipses, 100);
    }

    #[test]
    fn test_bonus_drawn_as_two_ellipses() {
        let mut state = GameState::new(Config::default(), 5).unwrap();
        state.starfield.stars.clear();
        state.bonus = Some(BonusTarget::spawn(1.0, &state.config));
        let ellipses: Vec<_> = build_frame(&state)
            .into_iter()
            .filter(|c| matches!(c, DrawCommand::Ellipse { .. }))
            .collect();
        assert_eq!(ellipses.len(), 2);
    }

    #[test]
    fn test_segment_color_scales_with_health() {
        let config = Config::default();
        let mut barrier = crate::sim::barrier::Barrier::new(0.0, 0.0, &config);
        assert_eq!(segment_color(&barrier.segments[0], 2), GREEN);
        barrier.apply_damage(&[0]).unwrap();
        assert_eq!(segment_color(&barrier.segments[0], 2), [0.0, 0.5, 0.0, 1.0]);
    }
}
