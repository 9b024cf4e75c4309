use serde::{Deserialize, Serialize};

/// Duration of the timer freeze granted by [`PowerupKind::Freeze`].
pub const FREEZE_EFFECT_SECS: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Bomb,
    Freeze,
    ClearLine,
}

impl PowerupKind {
    pub const ALL: [Self; 3] = [Self::Bomb, Self::Freeze, Self::ClearLine];

    pub const fn cooldown_secs(self) -> u32 {
        match self {
            Self::Bomb => 20,
            Self::Freeze => 45,
            Self::ClearLine => 35,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Bomb => 0,
            Self::Freeze => 1,
            Self::ClearLine => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArmOutcome {
    NoChange,
    Armed,
}

impl ArmOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Armed => true,
        }
    }
}

/// Arming exclusivity plus an independent cooldown deadline per power-up.
/// At most one power-up is armed at a time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerupBank {
    armed: Option<PowerupKind>,
    cooldown_until_ms: [Option<u64>; 3],
}

impl PowerupBank {
    pub fn armed(&self) -> Option<PowerupKind> {
        self.armed
    }

    pub fn cooldown_remaining_secs(&self, kind: PowerupKind, now_ms: u64) -> u32 {
        self.cooldown_until_ms[kind.index()]
            .map_or(0, |until| until.saturating_sub(now_ms).div_ceil(1_000) as u32)
    }

    pub fn is_ready(&self, kind: PowerupKind, now_ms: u64) -> bool {
        self.cooldown_remaining_secs(kind, now_ms) == 0
    }

    /// Cooling power-ups are inert; arming replaces any previously armed one.
    pub fn arm(&mut self, kind: PowerupKind, now_ms: u64) -> ArmOutcome {
        if !self.is_ready(kind, now_ms) || self.armed == Some(kind) {
            return ArmOutcome::NoChange;
        }
        self.armed = Some(kind);
        ArmOutcome::Armed
    }

    /// Disarms and starts the consumed power-up's cooldown. `None` when
    /// nothing is armed.
    pub fn consume(&mut self, now_ms: u64) -> Option<PowerupKind> {
        let kind = self.armed.take()?;
        self.cooldown_until_ms[kind.index()] =
            Some(now_ms + u64::from(kind.cooldown_secs()) * 1_000);
        Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_is_exclusive_across_power_ups() {
        let mut bank = PowerupBank::default();
        assert_eq!(bank.arm(PowerupKind::Bomb, 0), ArmOutcome::Armed);
        assert_eq!(bank.arm(PowerupKind::ClearLine, 0), ArmOutcome::Armed);
        assert_eq!(bank.armed(), Some(PowerupKind::ClearLine));
    }

    #[test]
    fn consuming_starts_the_cooldown_and_disarms() {
        let mut bank = PowerupBank::default();
        bank.arm(PowerupKind::Bomb, 0);

        assert_eq!(bank.consume(0), Some(PowerupKind::Bomb));
        assert_eq!(bank.armed(), None);
        assert_eq!(bank.cooldown_remaining_secs(PowerupKind::Bomb, 0), 20);
        assert_eq!(bank.consume(0), None);
    }

    #[test]
    fn cooling_power_up_cannot_be_rearmed_until_zero() {
        let mut bank = PowerupBank::default();
        bank.arm(PowerupKind::Freeze, 0);
        bank.consume(0);

        assert_eq!(bank.arm(PowerupKind::Freeze, 44_999), ArmOutcome::NoChange);
        assert_eq!(bank.cooldown_remaining_secs(PowerupKind::Freeze, 44_999), 1);
        assert_eq!(bank.arm(PowerupKind::Freeze, 45_000), ArmOutcome::Armed);
    }

    #[test]
    fn cooldowns_run_independently() {
        let mut bank = PowerupBank::default();
        bank.arm(PowerupKind::Bomb, 0);
        bank.consume(0);

        assert!(bank.is_ready(PowerupKind::ClearLine, 1));
        assert_eq!(bank.arm(PowerupKind::ClearLine, 1), ArmOutcome::Armed);
    }
}
