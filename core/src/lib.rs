#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use chain::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use mode::*;
pub use powerup::*;
pub use score::*;
pub use types::*;
pub use view::*;

mod cell;
mod chain;
mod clock;
mod engine;
mod error;
mod grid;
mod mode;
mod powerup;
mod score;
mod types;
mod view;

/// Everything needed to start a round. The seed drives all randomness, so a
/// config reproduces its round exactly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub seed: u64,
}

impl RoundConfig {
    pub const fn new(mode: GameMode, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            mode,
            difficulty,
            seed,
        }
    }
}
