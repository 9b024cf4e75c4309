use serde::{Deserialize, Serialize};

/// Face a grid cell currently shows to the player. Gold keeps the numeric
/// value it decorates; a beach ball replaces it entirely.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellFace {
    Number(u8),
    Gold(u8),
    BeachBall,
}

impl CellFace {
    /// Contribution to a chain sum; beach balls count as zero.
    pub const fn value(self) -> u8 {
        match self {
            Self::Number(value) | Self::Gold(value) => value,
            Self::BeachBall => 0,
        }
    }

    pub const fn is_gold(self) -> bool {
        matches!(self, Self::Gold(_))
    }

    pub const fn is_beach_ball(self) -> bool {
        matches!(self, Self::BeachBall)
    }
}
