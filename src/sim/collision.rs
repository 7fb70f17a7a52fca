//! Collision resolution
//!
//! Split in two: [`resolve`] scans a snapshot of the state and decides what
//! is hit, [`Resolution::apply`] then removes and damages in one pass. The
//! scan tracks member liveness and segment health in working copies, so an
//! entity consumed earlier in the pass is never matched again and no
//! collection is mutated while it is being iterated.
//!
//! Order per player projectile: bonus target, then formation members, then
//! barrier segments. Enemy projectiles check the player, then segments. The
//! first match in collection order wins.

use super::entity::{Body, HasBody};
use super::state::{GameEvent, GameState};
use super::wave;

/// Decisions produced by one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Indices into `player_shots`, ascending
    pub player_shots_spent: Vec<usize>,
    /// Indices into `enemy_shots`, ascending
    pub enemy_shots_spent: Vec<usize>,
    /// Indices into `members`, ascending
    pub members_destroyed: Vec<usize>,
    /// One entry per point of damage: (barrier, segment)
    pub segment_hits: Vec<(usize, usize)>,
    pub bonus_destroyed: bool,
    pub points: u64,
    pub player_hit: bool,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.player_shots_spent.is_empty()
            && self.enemy_shots_spent.is_empty()
            && self.members_destroyed.is_empty()
            && self.segment_hits.is_empty()
            && !self.bonus_destroyed
            && !self.player_hit
    }
}

/// Segment health as seen so far in the pass
struct SegmentLedger {
    health: Vec<Vec<u8>>,
}

impl SegmentLedger {
    fn new(state: &GameState) -> Self {
        Self {
            health: state
                .barriers
                .iter()
                .map(|b| b.segments.iter().map(|s| s.health).collect())
                .collect(),
        }
    }

    /// Damage the first live segment overlapping `body`, if any
    fn hit_first(&mut self, state: &GameState, body: &Body) -> Option<(usize, usize)> {
        for (b, barrier) in state.barriers.iter().enumerate() {
            for (s, segment) in barrier.segments.iter().enumerate() {
                let health = &mut self.health[b][s];
                if *health > 0 && segment.overlaps(body) {
                    *health -= 1;
                    return Some((b, s));
                }
            }
        }
        None
    }
}

/// Decide every hit for this tick without mutating the state
pub fn resolve(state: &GameState) -> Resolution {
    let mut out = Resolution::default();
    let mut member_alive = vec![true; state.members.len()];
    let mut segments = SegmentLedger::new(state);
    let mut bonus_alive = state.bonus.is_some();

    for (p, shot) in state.player_shots.iter().enumerate() {
        if bonus_alive {
            if let Some(bonus) = &state.bonus {
                if shot.overlaps(bonus) {
                    bonus_alive = false;
                    out.bonus_destroyed = true;
                    out.points += bonus.points;
                    out.player_shots_spent.push(p);
                    continue;
                }
            }
        }

        let victim = state
            .members
            .iter()
            .enumerate()
            .find(|(m, member)| member_alive[*m] && shot.overlaps(*member))
            .map(|(m, _)| m);
        if let Some(m) = victim {
            member_alive[m] = false;
            out.members_destroyed.push(m);
            out.points += state.config.kill_points;
            out.player_shots_spent.push(p);
            continue;
        }

        if let Some(hit) = segments.hit_first(state, &shot.body) {
            out.segment_hits.push(hit);
            out.player_shots_spent.push(p);
        }
    }

    for (e, shot) in state.enemy_shots.iter().enumerate() {
        if shot.overlaps(&state.player) {
            out.player_hit = true;
            out.enemy_shots_spent.push(e);
            continue;
        }
        if let Some(hit) = segments.hit_first(state, &shot.body) {
            out.segment_hits.push(hit);
            out.enemy_shots_spent.push(e);
        }
    }

    out.members_destroyed.sort_unstable();
    out
}

/// Keep the elements whose index is not listed in `spent` (ascending)
fn retain_unspent<T>(items: &mut Vec<T>, spent: &[usize]) {
    if spent.is_empty() {
        return;
    }
    let mut index = 0;
    let mut next = spent.iter().peekable();
    items.retain(|_| {
        let keep = next.peek() != Some(&&index);
        if !keep {
            next.next();
        }
        index += 1;
        keep
    });
}

impl Resolution {
    /// Apply the decisions to the state, emitting events
    pub fn apply(self, state: &mut GameState) {
        retain_unspent(&mut state.player_shots, &self.player_shots_spent);
        retain_unspent(&mut state.enemy_shots, &self.enemy_shots_spent);

        if !self.members_destroyed.is_empty() {
            retain_unspent(&mut state.members, &self.members_destroyed);
            for _ in &self.members_destroyed {
                state.events.push(GameEvent::MemberDestroyed);
            }
        }

        if !self.segment_hits.is_empty() {
            let mut per_barrier: Vec<Vec<usize>> = vec![Vec::new(); state.barriers.len()];
            for &(b, s) in &self.segment_hits {
                per_barrier[b].push(s);
            }
            for (barrier, hits) in state.barriers.iter_mut().zip(&per_barrier) {
                if hits.is_empty() {
                    continue;
                }
                if let Err(e) = barrier.apply_damage(hits) {
                    log::error!("barrier damage skipped: {}", e);
                }
            }
        }

        if self.bonus_destroyed && state.bonus.take().is_some() {
            log::debug!("bonus target destroyed");
            state.events.push(GameEvent::BonusDespawned);
        }

        if self.points > 0 {
            state.score += self.points;
            state.events.push(GameEvent::ScoreChanged(state.score));
        }

        if self.player_hit {
            wave::end_game(state);
        }
    }
}
