use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, RngExt, SeedableRng};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Delay before a winning chain's cells are regenerated.
pub const WIN_RESOLVE_MS: u64 = 700;

/// Delay before an overflowing chain is cleared.
pub const OVERFLOW_RESOLVE_MS: u64 = 500;

/// Delay between a power-up explosion and the refill of its cells.
pub const POWERUP_CLEAR_MS: u64 = 500;

/// Lifetime of the feedback banner when nothing hides it earlier.
pub const FEEDBACK_MS: u64 = 1_500;

/// Interval between gold spawn attempts.
pub const GOLD_SPAWN_INTERVAL_MS: u64 = 5_000;

const SECOND_MS: u64 = 1_000;

/// What a cell click did to the round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Chain grew by one cell, sum still below the target.
    Extended,
    /// Last chain element popped off.
    Undone,
    /// Invalid selection, chain reset to empty.
    ChainReset,
    /// Sum reached the target; points banked, regeneration scheduled.
    Matched { points: u32 },
    /// Sum overflowed the target; a clear is scheduled, values persist.
    Overflowed,
    /// The click consumed the armed power-up instead of selecting.
    PowerupUsed(PowerupKind),
}

/// Deferred resolution of a completed chain episode. Input stays live during
/// the delay, so several episodes can be in flight at once; each fires at its
/// own deadline, and game over cancels them all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum Pending {
    /// Winning chain: regenerate its cells, clear the chain, then redraw the
    /// target when the rules say so.
    Regenerate {
        due_ms: u64,
        cells: SmallVec<[Coord2; 16]>,
    },
    /// Overflowed chain: only the selection resets.
    ClearChain { due_ms: u64 },
}

impl Pending {
    const fn due_ms(&self) -> u64 {
        match self {
            Self::Regenerate { due_ms, .. } | Self::ClearChain { due_ms } => *due_ms,
        }
    }
}

/// A power-up explosion waiting for its refill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct PendingClear {
    due_ms: u64,
    cells: SmallVec<[Coord2; 16]>,
}

/// Owns one round from start to game over: grid, selection chain, countdown,
/// scoring, and power-ups, advanced by an externally driven virtual clock.
#[derive(Clone, Debug)]
pub struct RoundEngine {
    rules: RoundRules,
    grid: Grid,
    chain: SelectionChain,
    clock: RoundClock,
    powerups: Option<PowerupBank>,
    rng: SmallRng,
    target: u32,
    score: u32,
    now_ms: u64,
    next_tick_ms: u64,
    next_gold_spawn_ms: Option<u64>,
    pending: Vec<Pending>,
    powerup_clears: Vec<PendingClear>,
    banner: Option<(FeedbackKind, u64)>,
    game_over: bool,
}

fn draw_target<R: Rng>(rules: &RoundRules, rng: &mut R) -> u32 {
    rng.random_range(rules.target_min..=rules.target_max)
}

impl RoundEngine {
    pub fn new(config: RoundConfig) -> Self {
        let rules = RoundRules::resolve(config.mode, config.difficulty);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let grid = Grid::generate(&mut rng);
        let target = draw_target(&rules, &mut rng);
        Self::assemble(rules, rng, grid, target)
    }

    /// Starts from an explicit layout and target. Deterministic entry point
    /// for tests and replays.
    pub fn with_grid(config: RoundConfig, grid: Grid, target: u32) -> Self {
        let rules = RoundRules::resolve(config.mode, config.difficulty);
        let rng = SmallRng::seed_from_u64(config.seed);
        Self::assemble(rules, rng, grid, target)
    }

    fn assemble(rules: RoundRules, rng: SmallRng, grid: Grid, target: u32) -> Self {
        log::debug!("round start: {:?}/{:?}, target {}", rules.mode, rules.difficulty, target);
        Self {
            grid,
            chain: SelectionChain::default(),
            clock: RoundClock::new(rules.time_budget_secs),
            powerups: rules.powerups_enabled.then(PowerupBank::default),
            rng,
            target,
            score: 0,
            now_ms: 0,
            next_tick_ms: SECOND_MS,
            next_gold_spawn_ms: rules.gold_enabled.then_some(GOLD_SPAWN_INTERVAL_MS),
            pending: Vec::new(),
            powerup_clears: Vec::new(),
            banner: None,
            game_over: false,
            rules,
        }
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// One player click on a grid cell. Routes to the armed power-up when one
    /// is waiting for a target, otherwise drives the selection chain and
    /// re-evaluates the sum.
    pub fn click_cell(&mut self, coords: Coord2) -> Result<ClickOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_active()?;

        let now_ms = self.now_ms;
        if let Some(kind) = self.powerups.as_mut().and_then(|bank| bank.consume(now_ms)) {
            self.apply_powerup(kind, coords);
            return Ok(ClickOutcome::PowerupUsed(kind));
        }

        let face = self.grid.face_at(coords);
        match self.chain.apply_click(coords, face) {
            ChainMove::Reset => {
                self.banner = None;
                Ok(ClickOutcome::ChainReset)
            }
            ChainMove::Undone => Ok(self.evaluate_chain(ClickOutcome::Undone)),
            ChainMove::Extended => Ok(self.evaluate_chain(ClickOutcome::Extended)),
        }
    }

    /// Arms a power-up, replacing any previously armed one. Inert while the
    /// power-up is cooling down.
    pub fn arm_powerup(&mut self, kind: PowerupKind) -> Result<ArmOutcome> {
        self.check_active()?;
        let now_ms = self.now_ms;
        match self.powerups.as_mut() {
            Some(bank) => Ok(bank.arm(kind, now_ms)),
            None => Err(GameError::PowerupsUnavailable),
        }
    }

    /// Advances virtual time by `ms`, firing every due internal event in
    /// timestamp order. Among same-instant events the countdown fires last,
    /// so a simultaneous chain resolution completes before the round can end.
    pub fn advance(&mut self, ms: u64) {
        let deadline = self.now_ms + ms;
        while !self.game_over {
            let Some(due) = self.next_event_at(deadline) else {
                break;
            };
            self.now_ms = due;
            self.fire_events_at(due);
        }
        self.now_ms = deadline;
    }

    fn next_event_at(&self, deadline: u64) -> Option<u64> {
        let candidates = [
            self.pending.iter().map(Pending::due_ms).min(),
            self.powerup_clears.iter().map(|clear| clear.due_ms).min(),
            self.grid.next_gold_expiry(),
            self.next_gold_spawn_ms,
            Some(self.next_tick_ms),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|&at| at <= deadline)
            .min()
    }

    fn fire_events_at(&mut self, now_ms: u64) {
        // Episodes resolve by deadline, not creation order: an overflow's
        // short clear can come due before an earlier win's regeneration.
        loop {
            let due = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, pending)| pending.due_ms() <= now_ms)
                .min_by_key(|(_, pending)| pending.due_ms())
                .map(|(index, _)| index);
            let Some(index) = due else {
                break;
            };
            let pending = self.pending.remove(index);
            self.resolve_pending(pending);
        }

        let mut index = 0;
        while index < self.powerup_clears.len() {
            if self.powerup_clears[index].due_ms <= now_ms {
                let clear = self.powerup_clears.swap_remove(index);
                self.grid
                    .regenerate(&clear.cells, self.rules.beach_ball_chance, &mut self.rng);
            } else {
                index += 1;
            }
        }

        self.grid.expire_gold(now_ms);

        if self.next_gold_spawn_ms.map_or(false, |at| at <= now_ms) {
            if let Some(coords) = self.grid.spawn_gold(&mut self.rng, now_ms) {
                log::trace!("gold spawned at {:?}", coords);
            }
            self.next_gold_spawn_ms = Some(now_ms + GOLD_SPAWN_INTERVAL_MS);
        }

        if self.next_tick_ms <= now_ms {
            self.next_tick_ms = now_ms + SECOND_MS;
            if matches!(self.clock.tick(now_ms), TickOutcome::Expired) {
                self.finish_round();
            }
        }
    }

    /// Re-evaluates the chain sum after a mutation; `fallthrough` is returned
    /// when nothing decisive happened.
    fn evaluate_chain(&mut self, fallthrough: ClickOutcome) -> ClickOutcome {
        if self.chain.is_empty() {
            self.banner = None;
            return fallthrough;
        }

        let sum = self.chain.sum();
        if sum == self.target {
            let award = Award::for_chain(
                &self.rules,
                self.chain.len(),
                self.chain.has_gold(),
                self.chain.has_beach_ball(),
            );
            self.score += award.points;
            if award.time_bonus_secs > 0 {
                self.clock.add_secs(award.time_bonus_secs);
            }
            self.show_banner(FeedbackKind::Correct);
            self.pending.push(Pending::Regenerate {
                due_ms: self.now_ms + WIN_RESOLVE_MS,
                cells: self.chain.coords().collect(),
            });
            log::debug!(
                "chain of {} matched target {}, +{} points",
                self.chain.len(),
                self.target,
                award.points
            );
            ClickOutcome::Matched { points: award.points }
        } else if sum > self.target {
            self.show_banner(FeedbackKind::Error);
            self.pending.push(Pending::ClearChain {
                due_ms: self.now_ms + OVERFLOW_RESOLVE_MS,
            });
            ClickOutcome::Overflowed
        } else {
            // A chain still under the target shows no verdict yet.
            self.banner = None;
            fallthrough
        }
    }

    fn resolve_pending(&mut self, pending: Pending) {
        match pending {
            Pending::Regenerate { cells, .. } => {
                self.grid
                    .regenerate(&cells, self.rules.beach_ball_chance, &mut self.rng);
                self.chain.clear();
                self.banner = None;
                if self.rules.redraw_target {
                    self.target = draw_target(&self.rules, &mut self.rng);
                    log::debug!("new target {}", self.target);
                }
            }
            Pending::ClearChain { .. } => {
                self.chain.clear();
                self.banner = None;
            }
        }
    }

    fn apply_powerup(&mut self, kind: PowerupKind, target: Coord2) {
        log::debug!("power-up {:?} used at {:?}", kind, target);
        match kind {
            PowerupKind::Freeze => self.clock.freeze(self.now_ms, FREEZE_EFFECT_SECS),
            PowerupKind::Bomb => self.schedule_clear(iter_box(target).collect()),
            PowerupKind::ClearLine => self.schedule_clear(iter_cross(target).collect()),
        }
    }

    fn schedule_clear(&mut self, cells: SmallVec<[Coord2; 16]>) {
        // A clear that swallows selected cells invalidates the chain.
        if cells.iter().any(|&coords| self.chain.contains(coords)) {
            self.chain.clear();
            self.banner = None;
        }
        self.powerup_clears.push(PendingClear {
            due_ms: self.now_ms + POWERUP_CLEAR_MS,
            cells,
        });
    }

    /// Terminal transition; fires once. Outstanding schedules are dropped so
    /// nothing mutates a finished round.
    fn finish_round(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.pending.clear();
        self.powerup_clears.clear();
        self.next_gold_spawn_ms = None;
        self.banner = None;
        log::debug!("round over, final score {}", self.score);
    }

    fn check_active(&self) -> Result<()> {
        if self.game_over {
            Err(GameError::RoundOver)
        } else {
            Ok(())
        }
    }

    fn show_banner(&mut self, kind: FeedbackKind) {
        self.banner = Some((kind, self.now_ms + FEEDBACK_MS));
    }

    fn banner_kind(&self) -> FeedbackKind {
        match self.banner {
            Some((kind, until)) if self.now_ms < until => kind,
            _ => FeedbackKind::None,
        }
    }

    fn sum_text(&self) -> String {
        if self.chain.is_empty() {
            return String::from("???");
        }
        let mut text = String::new();
        for (index, snapshot) in self.chain.iter().enumerate() {
            if index > 0 {
                text.push_str(" + ");
            }
            text.push_str(&format!("{}", snapshot.value));
        }
        text
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.grid.validate_coords(coords)?;
        let face = self.grid.face_at(coords);
        let selected = self.chain.contains(coords);
        // The newest episode is the one the current chain belongs to.
        let (correct, error) = match self.pending.last() {
            Some(Pending::Regenerate { .. }) => (selected, false),
            Some(Pending::ClearChain { .. }) => (false, selected),
            None => (false, false),
        };
        Ok(CellView {
            coords,
            value: match face {
                CellFace::BeachBall => None,
                face => Some(face.value()),
            },
            gold: face.is_gold(),
            beach_ball: face.is_beach_ball(),
            selected,
            correct,
            error,
        })
    }

    pub fn grid_view(&self) -> Vec<CellView> {
        iter_all()
            .filter_map(|coords| self.cell_view(coords).ok())
            .collect()
    }

    pub fn hud(&self) -> HudView {
        HudView {
            target: self.target,
            sum_text: self.sum_text(),
            feedback: self.banner_kind(),
            score: self.score,
            time_text: self.clock.display(),
            frozen: self.clock.is_frozen(self.now_ms),
        }
    }

    pub fn powerup_views(&self) -> Vec<PowerupView> {
        match &self.powerups {
            Some(bank) => PowerupKind::ALL
                .iter()
                .map(|&kind| PowerupView {
                    kind,
                    armed: bank.armed() == Some(kind),
                    cooldown_secs: bank.cooldown_remaining_secs(kind, self.now_ms),
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// `None` while the round is still running.
    pub fn summary(&self) -> Option<RoundSummary> {
        self.game_over.then(|| RoundSummary {
            score: self.score,
            bonus_secs: self.rules.gold_enabled.then(|| self.clock.bonus_secs()),
        })
    }
}
