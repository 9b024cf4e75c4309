use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Cell outside the grid")]
    OutOfBounds,
    #[error("Round already ended, no new moves are accepted")]
    RoundOver,
    #[error("Power-ups are not available in this mode")]
    PowerupsUnavailable,
}

pub type Result<T> = core::result::Result<T, GameError>;
