use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use scores::*;
pub use service::*;
pub use store::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod board;
mod engine;
mod error;
mod game;
mod generator;
mod scores;
mod service;
mod store;
mod tile;
mod types;
mod view;

/// Shape and mine count of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    /// At least one safe cell must remain, a board of only mines can't be played.
    pub fn validate(self) -> Result<Self> {
        if self.rows == 0 || self.cols == 0 || self.mines >= self.total_cells() {
            Err(GameError::InvalidConfiguration)
        } else {
            Ok(self)
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new(9, 9, 10),
            Self::Medium => BoardConfig::new(16, 16, 40),
            Self::Hard => BoardConfig::new(16, 30, 99),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.as_str() == s)
            .ok_or_else(|| UnknownDifficulty(s.to_owned()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown difficulty {0:?}, expected one of easy, medium, hard")]
pub struct UnknownDifficulty(pub String);

/// Result of a reveal on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealOutcome {
    pub hit_mine: bool,
    /// How many cells changed from hidden to revealed.
    pub revealed: CellCount,
}

impl RevealOutcome {
    pub const NO_CHANGE: Self = Self {
        hit_mine: false,
        revealed: 0,
    };

    pub const fn has_update(self) -> bool {
        self.hit_mine || self.revealed > 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
