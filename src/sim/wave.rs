//! Wave and session transitions
//!
//! Wave clear, the next wave's rebuild with harder timing, game over and a
//! full reset.

use rand::RngCore;

use super::barrier::Barrier;
use super::formation::Formation;
use super::state::{GameEvent, GamePhase, GameState};
use super::targeting::DiveCap;
use crate::error::SimError;
use crate::platform::TickContext;

/// Freeze the session. Emits `GameOver` once.
pub fn end_game(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over on wave {} with score {}",
        state.wave,
        state.score
    );
    state.events.push(GameEvent::GameOver {
        final_score: state.score,
        wave: state.wave,
    });
}

/// Enter `WaveClear` once the formation is empty; start the next wave after
/// the delay.
pub fn check_progress(state: &mut GameState, ctx: &TickContext) {
    match state.phase {
        GamePhase::Playing if state.members.is_empty() => {
            log::info!("Wave {} cleared", state.wave);
            state.phase = GamePhase::WaveClear {
                since_ms: ctx.now_ms,
            };
            state.events.push(GameEvent::WaveCleared { wave: state.wave });
        }
        GamePhase::WaveClear { since_ms } => {
            if ctx.since(since_ms) >= state.config.wave_clear_delay_ms {
                advance_wave(state, ctx.now_ms);
            }
        }
        _ => {}
    }
}

/// Rebuild the field for the next wave and tighten the timing
pub fn advance_wave(state: &mut GameState, now_ms: f64) {
    state.player_shots.clear();
    state.enemy_shots.clear();
    if state.bonus.take().is_some() {
        state.events.push(GameEvent::BonusDespawned);
    }

    let config = &state.config;
    state.barriers = Barrier::build_row(config);
    state.members = Formation::spawn(config);
    state.formation.reset();

    state.fire_interval_ms =
        (state.fire_interval_ms * config.difficulty_decay).max(config.enemy_fire_interval_min_ms);
    state.anim_interval_ms =
        (state.anim_interval_ms * config.difficulty_decay).max(config.anim_interval_min_ms);
    state.dive_cap = DiveCap::default();

    state.wave_started_ms = now_ms;
    state.last_enemy_shot_ms = now_ms;
    state.last_dive_ms = now_ms;
    state.last_anim_ms = now_ms;
    state.last_bonus_spawn_ms = now_ms;

    state.wave += 1;
    state.phase = GamePhase::Playing;
    log::info!(
        "Wave {} started (fire interval {:.0} ms, anim interval {:.0} ms)",
        state.wave,
        state.fire_interval_ms,
        state.anim_interval_ms
    );
    state.events.push(GameEvent::WaveStarted { wave: state.wave });
}

/// Start a fresh session with the same config. The new seed is drawn from the
/// current gameplay stream so replays stay deterministic.
pub fn reset(state: &mut GameState, now_ms: f64) -> Result<(), SimError> {
    let seed = state.rng.next_u64();
    let had_bonus = state.bonus.is_some();
    *state = GameState::new_at(state.config.clone(), seed, now_ms)?;
    log::info!("Session reset (seed {seed})");
    if had_bonus {
        state.events.push(GameEvent::BonusDespawned);
    }
    state.events.push(GameEvent::Reset);
    state.events.push(GameEvent::ScoreChanged(0));
    Ok(())
}
