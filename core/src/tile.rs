use serde::{Deserialize, Serialize};

/// One square of the board.
///
/// The mine layout and `adjacent_mines` are fixed when the board is generated,
/// only `revealed` and `flagged` change during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) is_mine: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    /// Mine cells keep this at zero, the value is unused for them.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    /// Hidden and not flagged, the only state a reveal can act on.
    pub const fn is_hidden(self) -> bool {
        !self.revealed && !self.flagged
    }
}
