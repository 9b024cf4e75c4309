use alloc::string::String;

use crate::*;

/// Per-cell observation for the rendering collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub coords: Coord2,
    /// `None` for beach balls.
    pub value: Option<u8>,
    pub gold: bool,
    pub beach_ball: bool,
    pub selected: bool,
    pub correct: bool,
    pub error: bool,
}

/// Transient feedback message class shown beside the sum display.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FeedbackKind {
    #[default]
    None,
    Correct,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudView {
    pub target: u32,
    /// Chain values joined as an expression, or `"???"` when empty.
    pub sum_text: String,
    pub feedback: FeedbackKind,
    pub score: u32,
    pub time_text: String,
    pub frozen: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PowerupView {
    pub kind: PowerupKind,
    pub armed: bool,
    pub cooldown_secs: u32,
}

/// End-of-round summary, available once the round is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    /// Cumulative bonus time won; exposed for classic/hard rounds only.
    pub bonus_secs: Option<u32>,
}
