use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board configuration")]
    InvalidConfiguration,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Game not found")]
    GameNotFound,
    #[error("Game already finished, no new moves are accepted")]
    GameFinished,
    #[error("Player name must be between 1 and 50 characters")]
    InvalidPlayerName,
    #[error("Invalid score: {0}")]
    InvalidScore(&'static str),
    #[error("Score storage failed: {0}")]
    Storage(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
