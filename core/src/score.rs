use serde::{Deserialize, Serialize};

use crate::*;

/// Multiplier applied to combo chains, capped at x5 from length 6 up.
pub const fn combo_multiplier(chain_len: usize) -> u32 {
    match chain_len {
        0..=2 => 1,
        3 => 2,
        4 => 3,
        5 => 4,
        _ => 5,
    }
}

/// Points plus timer side effect earned by one successful chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub points: u32,
    pub time_bonus_secs: u32,
}

impl Award {
    /// Pure rule dispatch over inputs captured at evaluation time.
    pub fn for_chain(rules: &RoundRules, chain_len: usize, has_gold: bool, has_beach_ball: bool) -> Self {
        use GameMode::*;

        match rules.mode {
            Combo => Self {
                points: chain_len as u32 * combo_multiplier(chain_len),
                time_bonus_secs: 0,
            },
            Survival => Self {
                points: 1,
                time_bonus_secs: 5,
            },
            Seasonal => Self {
                points: if has_beach_ball { 2 } else { 1 },
                time_bonus_secs: 0,
            },
            Classic | Powerups if has_gold => Self {
                points: 2,
                time_bonus_secs: 10,
            },
            Classic | Powerups => Self {
                points: 1,
                time_bonus_secs: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(mode: GameMode) -> RoundRules {
        RoundRules::resolve(mode, Difficulty::Easy)
    }

    #[test]
    fn combo_lengths_follow_the_multiplier_table() {
        let combo = rules(GameMode::Combo);
        let expected = [(2, 2), (3, 6), (4, 12), (5, 20), (6, 30), (7, 35)];
        for (len, points) in expected {
            assert_eq!(Award::for_chain(&combo, len, false, false).points, points);
        }
    }

    #[test]
    fn combo_ignores_gold_and_beach_balls() {
        let combo = rules(GameMode::Combo);
        let award = Award::for_chain(&combo, 3, true, true);
        assert_eq!(award, Award { points: 6, time_bonus_secs: 0 });
    }

    #[test]
    fn gold_doubles_points_and_grants_time() {
        let classic = rules(GameMode::Classic);
        assert_eq!(
            Award::for_chain(&classic, 2, true, false),
            Award { points: 2, time_bonus_secs: 10 }
        );
        assert_eq!(
            Award::for_chain(&classic, 2, false, false),
            Award { points: 1, time_bonus_secs: 0 }
        );
    }

    #[test]
    fn survival_always_grants_five_seconds() {
        let survival = rules(GameMode::Survival);
        assert_eq!(
            Award::for_chain(&survival, 4, false, false),
            Award { points: 1, time_bonus_secs: 5 }
        );
    }

    #[test]
    fn seasonal_beach_ball_adds_one_point() {
        let seasonal = rules(GameMode::Seasonal);
        assert_eq!(Award::for_chain(&seasonal, 3, false, true).points, 2);
        assert_eq!(Award::for_chain(&seasonal, 3, false, false).points, 1);
    }
}
