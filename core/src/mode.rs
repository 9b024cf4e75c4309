use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Classic,
    Survival,
    Combo,
    Powerups,
    Seasonal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Inclusive target range of the classic tier; combo and power-up rounds
    /// reuse it.
    pub const fn target_range(self) -> (u32, u32) {
        match self {
            Self::Easy => (10, 15),
            Self::Normal => (12, 20),
            Self::Hard => (15, 25),
        }
    }
}

/// Per-round rule set, resolved once at round start and immutable for the
/// round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundRules {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub time_budget_secs: u32,
    pub target_min: u32,
    pub target_max: u32,
    pub gold_enabled: bool,
    pub redraw_target: bool,
    pub beach_ball_chance: f64,
    pub powerups_enabled: bool,
}

impl RoundRules {
    pub fn resolve(mode: GameMode, difficulty: Difficulty) -> Self {
        use GameMode::*;

        let (target_min, target_max) = match mode {
            // Survival and seasonal pin the easy range regardless of tier.
            Survival | Seasonal => (10, 15),
            Classic | Combo | Powerups => difficulty.target_range(),
        };

        let time_budget_secs = match (mode, difficulty) {
            (Classic, Difficulty::Easy) => 120,
            (Classic, _) | (Combo, _) => 90,
            (Survival, _) => 30,
            (Powerups, _) | (Seasonal, _) => 120,
        };

        Self {
            mode,
            difficulty,
            time_budget_secs,
            target_min,
            target_max,
            gold_enabled: matches!((mode, difficulty), (Classic, Difficulty::Hard)),
            // Classic easy/normal keep their target across wins; every other
            // mode redraws it after each successful chain.
            redraw_target: !matches!(
                (mode, difficulty),
                (Classic, Difficulty::Easy | Difficulty::Normal)
            ),
            beach_ball_chance: if matches!(mode, Seasonal) { 0.12 } else { 0.0 },
            powerups_enabled: matches!(mode, Powerups),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_tiers_follow_the_dispatch_table() {
        let easy = RoundRules::resolve(GameMode::Classic, Difficulty::Easy);
        assert_eq!(easy.time_budget_secs, 120);
        assert_eq!((easy.target_min, easy.target_max), (10, 15));
        assert!(!easy.gold_enabled);
        assert!(!easy.redraw_target);

        let normal = RoundRules::resolve(GameMode::Classic, Difficulty::Normal);
        assert_eq!(normal.time_budget_secs, 90);
        assert_eq!((normal.target_min, normal.target_max), (12, 20));
        assert!(!normal.redraw_target);

        let hard = RoundRules::resolve(GameMode::Classic, Difficulty::Hard);
        assert_eq!(hard.time_budget_secs, 90);
        assert_eq!((hard.target_min, hard.target_max), (15, 25));
        assert!(hard.gold_enabled);
        assert!(hard.redraw_target);
    }

    #[test]
    fn survival_and_seasonal_pin_the_easy_range() {
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let survival = RoundRules::resolve(GameMode::Survival, difficulty);
            assert_eq!((survival.target_min, survival.target_max), (10, 15));
            assert_eq!(survival.time_budget_secs, 30);

            let seasonal = RoundRules::resolve(GameMode::Seasonal, difficulty);
            assert_eq!((seasonal.target_min, seasonal.target_max), (10, 15));
            assert_eq!(seasonal.time_budget_secs, 120);
            assert_eq!(seasonal.beach_ball_chance, 0.12);
        }
    }

    #[test]
    fn combo_and_powerups_reuse_the_difficulty_tier_range() {
        let combo = RoundRules::resolve(GameMode::Combo, Difficulty::Hard);
        assert_eq!((combo.target_min, combo.target_max), (15, 25));
        assert_eq!(combo.time_budget_secs, 90);

        let powerups = RoundRules::resolve(GameMode::Powerups, Difficulty::Normal);
        assert_eq!((powerups.target_min, powerups.target_max), (12, 20));
        assert_eq!(powerups.time_budget_secs, 120);
        assert!(powerups.powerups_enabled);
        assert!(!combo.powerups_enabled);
    }
}
