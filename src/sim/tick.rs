//! Per-tick simulation step
//!
//! One call advances every entity once, resolves collisions and checks for
//! wave clear. Movement is a fixed step per tick; every timer compares the
//! tick's wall-clock `now_ms` against a stored timestamp.

use rand::Rng;

use super::barrier::highest_segment_top;
use super::bonus::BonusTarget;
use super::collision;
use super::formation::FormationStep;
use super::state::{GameEvent, GamePhase, GameState};
use super::targeting::{choose_diver, choose_shooter};
use super::wave;
use crate::platform::TickContext;

/// Advance the game state by one tick. A no-op once the game is over.
pub fn tick(state: &mut GameState, ctx: &TickContext) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.time_ticks += 1;

    state.starfield.update();
    update_player(state, ctx);

    if state.phase == GamePhase::Playing {
        enemy_fire(state, ctx);
        let step = state.formation.step(&mut state.members, &state.config);
        if step == FormationStep::Flipped {
            log::trace!("Formation flipped, direction {}", state.formation.direction);
        }
        animate(state, ctx);
        maybe_spawn_bonus(state, ctx);
        trigger_dive(state, ctx);
        update_members(state, ctx);
    }

    update_bonus(state);
    update_projectiles(state);

    let resolution = collision::resolve(state);
    if !resolution.is_empty() {
        resolution.apply(state);
    }

    wave::check_progress(state, ctx);
}

fn update_player(state: &mut GameState, ctx: &TickContext) {
    state
        .player
        .move_by(ctx.input.horizontal(), state.config.field_width);

    if ctx.input.fire {
        if let Some(shot) = state.player.try_fire(ctx.now_ms, &state.config) {
            state.player_shots.push(shot);
            state.events.push(GameEvent::PlayerFired);
        }
    }
}

/// Front-line fire, after the wave's grace period and throttled by the
/// current fire interval
fn enemy_fire(state: &mut GameState, ctx: &TickContext) {
    if ctx.since(state.wave_started_ms) <= state.config.fire_grace_ms
        || ctx.since(state.last_enemy_shot_ms) <= state.fire_interval_ms
    {
        return;
    }
    let shooter = choose_shooter(
        &state.members,
        state.player.center_x(),
        state.config.aimed_shot_probability,
        &mut state.rng,
    );
    if let Some(i) = shooter {
        let shot = state.members[i].fire(ctx.now_ms, &state.config);
        state.enemy_shots.push(shot);
        state.last_enemy_shot_ms = ctx.now_ms;
        state.events.push(GameEvent::EnemyFired);
    }
}

/// Flip every member's frame once per animation interval
fn animate(state: &mut GameState, ctx: &TickContext) {
    if state.members.is_empty() || ctx.since(state.last_anim_ms) <= state.anim_interval_ms {
        return;
    }
    state.last_anim_ms = ctx.now_ms;
    for member in &mut state.members {
        member.toggle_frame();
    }
    state.events.push(GameEvent::FormationPulse);
}

/// Every spawn interval, send a bonus target across if none is alive
fn maybe_spawn_bonus(state: &mut GameState, ctx: &TickContext) {
    if ctx.since(state.last_bonus_spawn_ms) <= state.config.bonus_spawn_interval_ms {
        return;
    }
    state.last_bonus_spawn_ms = ctx.now_ms;
    if state.bonus.is_some() {
        return;
    }
    let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
    log::debug!(
        "Bonus target spawned moving {}",
        if direction > 0.0 { "right" } else { "left" }
    );
    state.bonus = Some(BonusTarget::spawn(direction, &state.config));
    state.events.push(GameEvent::BonusSpawned);
}

fn update_bonus(state: &mut GameState) {
    let Some(bonus) = state.bonus.as_mut() else {
        return;
    };
    bonus.advance();
    if bonus.is_offscreen(&state.config) {
        state.bonus = None;
        log::debug!("Bonus target left the field");
        state.events.push(GameEvent::BonusDespawned);
    }
}

/// Send the in-formation member nearest the player on a dive, within the
/// current concurrency cap. Only a dive that actually starts restarts the
/// interval.
fn trigger_dive(state: &mut GameState, ctx: &TickContext) {
    if ctx.since(state.wave_started_ms) <= state.config.dive_grace_ms
        || ctx.since(state.last_dive_ms) <= state.config.dive_interval_ms
    {
        return;
    }

    let diving = state.diving_count();
    if !state.dive_cap.allows(diving) {
        return;
    }
    let Some(i) = choose_diver(&state.members, state.player.center_x()) else {
        return;
    };

    let config = &state.config;
    let target_y = highest_segment_top(&state.barriers)
        .map_or(config.max_hover_altitude, |top| {
            (top - config.hover_barrier_margin).min(config.max_hover_altitude)
        });

    if let Err(e) = state.members[i].start_dive(ctx.now_ms, target_y) {
        log::error!("Dive skipped: {}", e);
        return;
    }
    state.last_dive_ms = ctx.now_ms;
    log::debug!("Member {} diving to y={:.0} ({} away)", i, target_y, diving + 1);
    if state.dive_cap.record_dive(diving + 1) {
        log::debug!(
            "Dive cap saturated, next cap {}",
            state.dive_cap.max_divers
        );
    }
}

fn update_members(state: &mut GameState, ctx: &TickContext) {
    let player_x = state.player.center_x();
    let direction = state.formation.direction;
    for member in &mut state.members {
        if member.update(ctx, player_x, direction, &state.config) {
            state.enemy_shots.push(member.fire(ctx.now_ms, &state.config));
            state.events.push(GameEvent::EnemyFired);
        }
    }
}

fn update_projectiles(state: &mut GameState) {
    let height = state.config.field_height;
    for shot in state.player_shots.iter_mut().chain(state.enemy_shots.iter_mut()) {
        shot.advance();
    }
    state.player_shots.retain(|p| !p.is_offscreen(height));
    state.enemy_shots.retain(|p| !p.is_offscreen(height));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::platform::InputSnapshot;
    use crate::sim::member::DiveState;

    fn idle(now_ms: f64) -> TickContext {
        TickContext::new(now_ms, InputSnapshot::default())
    }

    fn new_state() -> GameState {
        GameState::new(Config::default(), 12345).unwrap()
    }

    #[test]
    fn test_game_over_is_noop() {
        let mut state = new_state();
        wave::end_game(&mut state);
        state.drain_events();
        let members_before = state.members.clone();
        let player_before = state.player.clone();

        let input = InputSnapshot {
            move_left: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &TickContext::new(60_000.0, input));

        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.members, members_before);
        assert_eq!(state.player, player_before);
        assert!(state.player_shots.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_player_moves_and_fires_with_cooldown() {
        let mut state = new_state();
        let x = state.player.body.pos.x;
        let input = InputSnapshot {
            move_right: true,
            fire: true,
            ..Default::default()
        };

        tick(&mut state, &TickContext::new(16.0, input));
        assert_eq!(state.player.body.pos.x, x + 5.0);
        assert_eq!(state.player_shots.len(), 1);
        assert_eq!(state.drain_events(), vec![GameEvent::PlayerFired]);

        // Still cooling down
        tick(&mut state, &TickContext::new(200.0, input));
        assert_eq!(state.player_shots.len(), 1);

        tick(&mut state, &TickContext::new(266.0, input));
        assert_eq!(state.player_shots.len(), 2);
    }

    #[test]
    fn test_enemy_fire_waits_for_grace_period() {
        let mut state = new_state();
        tick(&mut state, &idle(1500.0));
        assert!(state.enemy_shots.is_empty());

        tick(&mut state, &idle(2001.0));
        assert_eq!(state.enemy_shots.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::EnemyFired));
        assert_eq!(state.last_enemy_shot_ms, 2001.0);

        // Throttled by the fire interval
        tick(&mut state, &idle(2500.0));
        assert_eq!(state.enemy_shots.len(), 1);
    }

    #[test]
    fn test_dive_starts_after_grace_and_interval() {
        let mut state = new_state();
        tick(&mut state, &idle(4000.0));
        assert_eq!(state.diving_count(), 0);

        tick(&mut state, &idle(5001.0));
        assert_eq!(state.diving_count(), 1);
        let diver = state.members.iter().find(|m| m.is_diving()).unwrap();
        assert_eq!(diver.state, DiveState::Diving);
        // Highest barrier top 450 minus the margin
        assert_eq!(diver.target_y, 400.0);
        // Cap of one saturated, next cap is two
        assert_eq!(state.dive_cap.max_divers, 2);

        // Next interval: one away, cap two allows another
        tick(&mut state, &idle(10_002.0));
        assert_eq!(state.diving_count(), 2);
    }

    #[test]
    fn test_blocked_dive_keeps_interval_open() {
        let mut state = new_state();
        state.members[0].start_dive(0.0, 400.0).unwrap();

        // Cap of one already used up: nothing starts, the timer is untouched
        tick(&mut state, &idle(5001.0));
        assert_eq!(state.diving_count(), 1);
        assert_eq!(state.last_dive_ms, 0.0);
        assert_eq!(state.dive_cap.max_divers, 1);

        // The diver is back, so the next tick may dive straight away
        state.members[0].state = DiveState::InFormation;
        tick(&mut state, &idle(5200.0));
        assert_eq!(state.diving_count(), 1);
        assert_eq!(state.last_dive_ms, 5200.0);
    }

    #[test]
    fn test_animation_pulse() {
        let mut state = new_state();
        tick(&mut state, &idle(400.0));
        assert!(state.members.iter().all(|m| m.frame == 0));

        tick(&mut state, &idle(501.0));
        assert!(state.members.iter().all(|m| m.frame == 1));
        assert!(state.drain_events().contains(&GameEvent::FormationPulse));
    }

    #[test]
    fn test_bonus_spawns_and_leaves() {
        // Hold enemy fire and dives so nothing ends the run mid-crossing
        let config = Config {
            fire_grace_ms: 1e9,
            dive_grace_ms: 1e9,
            ..Config::default()
        };
        let mut state = GameState::new(config, 12345).unwrap();
        tick(&mut state, &idle(20_001.0));
        assert!(state.bonus.is_some());
        assert!(state.drain_events().contains(&GameEvent::BonusSpawned));

        // Cross the whole field well before the next spawn
        let mut now = 20_001.0;
        while state.bonus.is_some() {
            now += 1.0;
            tick(&mut state, &idle(now));
            assert!(now < 20_600.0, "bonus never left");
        }
        assert!(state.drain_events().contains(&GameEvent::BonusDespawned));
    }

    #[test]
    fn test_projectiles_culled_offscreen() {
        let mut state = new_state();
        state.members.clear();
        state.barriers.clear();
        let input = InputSnapshot {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &TickContext::new(0.0, input));
        assert_eq!(state.player_shots.len(), 1);
        for i in 1..=100 {
            tick(&mut state, &idle(i as f64));
        }
        assert!(state.player_shots.is_empty());
    }

    #[test]
    fn test_wave_advances_after_clear() {
        let mut state = new_state();
        state.members.clear();
        tick(&mut state, &idle(3000.0));
        assert!(matches!(state.phase, GamePhase::WaveClear { .. }));

        tick(&mut state, &idle(3500.0));
        assert_eq!(state.wave, 1);

        tick(&mut state, &idle(4000.0));
        assert_eq!(state.wave, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.members.len(), 50);
    }
}
