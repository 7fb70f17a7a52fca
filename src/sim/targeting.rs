//! Fire and dive selection policies
//!
//! Pure decisions over the member list; the tick applies them.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::member::FormationMember;

/// Concurrent diver caps, cycled each time the cap is reached
const CAP_SEQUENCE: [usize; 3] = [1, 2, 3];

/// Max-concurrent-divers cap and its cycle counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiveCap {
    pub max_divers: usize,
    pub cycle: u32,
}

impl Default for DiveCap {
    fn default() -> Self {
        Self {
            max_divers: CAP_SEQUENCE[0],
            cycle: 0,
        }
    }
}

impl DiveCap {
    /// Whether another dive may start with `diving` members already away
    pub fn allows(&self, diving: usize) -> bool {
        diving < self.max_divers
    }

    /// Record a dive that brought the count to `diving_after`.
    /// Returns true if that saturated the cap and advanced the cycle.
    pub fn record_dive(&mut self, diving_after: usize) -> bool {
        if diving_after < self.max_divers {
            return false;
        }
        self.cycle += 1;
        self.max_divers = CAP_SEQUENCE[self.cycle as usize % CAP_SEQUENCE.len()];
        true
    }
}

/// Index of the front-most (lowest on screen) member of each column.
///
/// Columns are keyed by the floored centre x, in left-to-right order.
pub fn front_line(members: &[FormationMember]) -> Vec<usize> {
    let mut columns: BTreeMap<i64, usize> = BTreeMap::new();
    for (i, member) in members.iter().enumerate() {
        let column = member.body.center().x.floor() as i64;
        columns
            .entry(column)
            .and_modify(|front| {
                if member.body.pos.y > members[*front].body.pos.y {
                    *front = i;
                }
            })
            .or_insert(i);
    }
    columns.into_values().collect()
}

/// Candidate whose centre is horizontally nearest `target_x`; first wins ties
fn nearest_by_center<I>(members: &[FormationMember], candidates: I, target_x: f32) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut best: Option<(usize, f32)> = None;
    for i in candidates {
        let gap = (members[i].body.center().x - target_x).abs();
        if best.is_none_or(|(_, best_gap)| gap < best_gap) {
            best = Some((i, gap));
        }
    }
    best.map(|(i, _)| i)
}

/// Pick the member that fires this round.
///
/// With probability `aim_probability` the front-line member nearest the
/// player, otherwise a uniformly random front-line member.
pub fn choose_shooter<R: Rng>(
    members: &[FormationMember],
    player_center_x: f32,
    aim_probability: f64,
    rng: &mut R,
) -> Option<usize> {
    let candidates = front_line(members);
    if candidates.is_empty() {
        return None;
    }
    if rng.random_bool(aim_probability) {
        nearest_by_center(members, candidates.iter().copied(), player_center_x)
    } else {
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}

/// Member in formation nearest the player horizontally
pub fn choose_diver(members: &[FormationMember], player_center_x: f32) -> Option<usize> {
    let available = members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.in_formation())
        .map(|(i, _)| i);
    nearest_by_center(members, available, player_center_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::formation::Formation;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_front_line_is_bottom_row() {
        let config = Config::default();
        let members = Formation::spawn(&config);
        let front = front_line(&members);
        assert_eq!(front, (40..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_front_line_after_kill() {
        let config = Config::default();
        let mut members = Formation::spawn(&config);
        // Remove the bottom member of column 2
        members.remove(42);
        let front = front_line(&members);
        assert_eq!(front.len(), 10);
        assert_eq!(members[front[2]].body.pos.y, 230.0);
    }

    #[test]
    fn test_aimed_shooter_is_nearest() {
        let config = Config::default();
        let members = Formation::spawn(&config);
        let mut rng = Pcg32::seed_from_u64(1);
        // Always aim
        let shooter = choose_shooter(&members, 300.0, 1.0, &mut rng).unwrap();
        // Column 4 centre is 50 + 240 + 15 = 305
        assert_eq!(shooter, 44);
    }

    #[test]
    fn test_default_aim_weighting() {
        let config = Config::default();
        let members = Formation::spawn(&config);
        let mut rng = Pcg32::seed_from_u64(42);
        let draws = 10_000;
        let aimed = (0..draws)
            .filter(|_| {
                choose_shooter(&members, 300.0, config.aimed_shot_probability, &mut rng) == Some(44)
            })
            .count();
        // 0.7 aimed plus a tenth of the random picks landing on the same column
        let share = aimed as f64 / draws as f64;
        assert!((0.70..=0.76).contains(&share), "aimed share {share}");
    }

    #[test]
    fn test_random_shooter_is_on_front_line() {
        let config = Config::default();
        let members = Formation::spawn(&config);
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..50 {
            let shooter = choose_shooter(&members, 300.0, 0.0, &mut rng).unwrap();
            assert!((40..50).contains(&shooter));
        }
        assert_eq!(choose_shooter(&[], 300.0, 0.5, &mut rng), None);
    }

    #[test]
    fn test_diver_skips_members_already_away() {
        let config = Config::default();
        let mut members = Formation::spawn(&config);
        let first = choose_diver(&members, 300.0).unwrap();
        // Top row wins the tie for the nearest column
        assert_eq!(first, 4);
        members[first].start_dive(0.0, 400.0).unwrap();
        assert_eq!(choose_diver(&members, 300.0), Some(14));
    }

    #[test]
    fn test_cap_sequence() {
        let mut cap = DiveCap::default();
        let mut caps = vec![cap.max_divers];
        for _ in 0..6 {
            let limit = cap.max_divers;
            for diving in 0..limit {
                assert!(cap.allows(diving));
                let saturated = cap.record_dive(diving + 1);
                assert_eq!(saturated, diving + 1 == limit);
            }
            caps.push(cap.max_divers);
        }
        assert_eq!(caps, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    proptest! {
        #[test]
        fn prop_cap_cycles_over_saturations(saturations in 0usize..40) {
            let mut cap = DiveCap::default();
            for _ in 0..saturations {
                let limit = cap.max_divers;
                prop_assert!(cap.record_dive(limit));
            }
            prop_assert_eq!(cap.max_divers, [1, 2, 3][saturations % 3]);
            prop_assert_eq!(cap.cycle as usize, saturations);
        }
    }
}
