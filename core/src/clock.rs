use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// One-second-resolution countdown with freeze and additive time bonuses.
/// Advancement comes from the round engine's virtual-time scheduler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundClock {
    time_left: u32,
    frozen_until_ms: Option<u64>,
    bonus_secs: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    Frozen,
    Expired,
}

impl RoundClock {
    pub fn new(budget_secs: u32) -> Self {
        Self {
            time_left: budget_secs,
            frozen_until_ms: None,
            bonus_secs: 0,
        }
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Cumulative bonus time won over the round.
    pub fn bonus_secs(&self) -> u32 {
        self.bonus_secs
    }

    pub fn is_frozen(&self, now_ms: u64) -> bool {
        self.frozen_until_ms.map_or(false, |until| now_ms < until)
    }

    /// One countdown step. Frozen ticks leave the remaining time untouched.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if self.is_frozen(now_ms) {
            return TickOutcome::Frozen;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            TickOutcome::Expired
        } else {
            TickOutcome::Running
        }
    }

    /// Purely additive, never caps.
    pub fn add_secs(&mut self, secs: u32) {
        self.time_left += secs;
        self.bonus_secs += secs;
    }

    /// Freezes for `secs` from `now_ms`. Re-freezing restarts the window, no
    /// stacking.
    pub fn freeze(&mut self, now_ms: u64, secs: u32) {
        self.frozen_until_ms = Some(now_ms + u64::from(secs) * 1_000);
    }

    pub fn display(&self) -> String {
        format!("{}:{:02}", self.time_left / 60, self.time_left % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_count_down_to_expiry() {
        let mut clock = RoundClock::new(2);
        assert_eq!(clock.tick(1_000), TickOutcome::Running);
        assert_eq!(clock.tick(2_000), TickOutcome::Expired);
        assert_eq!(clock.time_left(), 0);
    }

    #[test]
    fn frozen_ticks_do_not_decrement() {
        let mut clock = RoundClock::new(60);
        clock.freeze(0, 10);

        assert_eq!(clock.tick(1_000), TickOutcome::Frozen);
        assert_eq!(clock.tick(9_999), TickOutcome::Frozen);
        assert_eq!(clock.time_left(), 60);

        // The window is exclusive at its end.
        assert_eq!(clock.tick(10_000), TickOutcome::Running);
        assert_eq!(clock.time_left(), 59);
    }

    #[test]
    fn refreezing_restarts_the_window() {
        let mut clock = RoundClock::new(60);
        clock.freeze(0, 10);
        clock.freeze(8_000, 10);

        assert!(clock.is_frozen(17_999));
        assert!(!clock.is_frozen(18_000));
    }

    #[test]
    fn added_time_accumulates_as_bonus() {
        let mut clock = RoundClock::new(30);
        clock.add_secs(10);
        clock.add_secs(5);

        assert_eq!(clock.time_left(), 45);
        assert_eq!(clock.bonus_secs(), 15);
    }

    #[test]
    fn display_is_minutes_and_padded_seconds() {
        assert_eq!(RoundClock::new(120).display(), "2:00");
        assert_eq!(RoundClock::new(65).display(), "1:05");
        assert_eq!(RoundClock::new(5).display(), "0:05");
    }
}
