use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: Coord,
    pub col: Coord,
    pub revealed: bool,
    pub flagged: bool,
    pub is_mine: bool,
    pub adjacent_mines: u8,
}

/// Snapshot of a game as sent to the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStateView {
    pub game_id: GameId,
    pub difficulty: Difficulty,
    pub player_name: String,
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
    pub cells: Vec<CellView>,
    pub status: GameStatus,
    pub elapsed_seconds: f64,
}

impl GameStateView {
    pub fn cell(&self, (row, col): Coord2) -> Option<&CellView> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }
}

/// Builds the externally visible state of `game`.
///
/// A cell only reports `is_mine` when it has been revealed or when
/// `reveal_mines` is set, so unrevealed mine positions never leak.
pub fn project(game: &Game, reveal_mines: bool, now: DateTime<Utc>) -> GameStateView {
    let board = game.board();
    let cells = board
        .iter_cells()
        .map(|((row, col), cell)| CellView {
            row,
            col,
            revealed: cell.is_revealed(),
            flagged: cell.is_flagged(),
            is_mine: cell.is_mine() && (reveal_mines || cell.is_revealed()),
            adjacent_mines: cell.adjacent_mines(),
        })
        .collect();

    GameStateView {
        game_id: game.id().clone(),
        difficulty: game.difficulty(),
        player_name: game.player_name().to_owned(),
        rows: board.rows(),
        cols: board.cols(),
        mines: board.mine_count(),
        cells,
        status: game.status(),
        elapsed_seconds: game.elapsed_seconds_at(now),
    }
}
