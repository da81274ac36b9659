use chrono::{DateTime, Utc};
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque identifier of a live game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from creation until it is won or lost.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    id: GameId,
    difficulty: Difficulty,
    player_name: String,
    board: Board,
    status: GameStatus,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(difficulty: Difficulty, player_name: impl Into<String>, board: Board) -> Self {
        Self::with_id(GameId::generate(), difficulty, player_name, board)
    }

    pub fn with_id(
        id: GameId,
        difficulty: Difficulty,
        player_name: impl Into<String>,
        board: Board,
    ) -> Self {
        let started_at = Utc::now();
        log::debug!("game {} started at {}", id, started_at);
        Self {
            id,
            difficulty,
            player_name: player_name.into(),
            board,
            status: GameStatus::Playing,
            started_at,
            ended_at: None,
        }
    }

    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Seconds played as of `now`, frozen once the game has ended.
    pub fn elapsed_seconds_at(&self, now: DateTime<Utc>) -> f64 {
        let until = self.ended_at.unwrap_or(now);
        let millis = (until - self.started_at).num_milliseconds().max(0);
        (millis as f64 / 10.0).round() / 100.0
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_playing()?;

        let outcome = self.board.reveal(coords)?;
        if outcome.hit_mine {
            self.mark_ended(GameStatus::Lost);
        } else if outcome.revealed > 0 && self.board.is_won() {
            self.mark_ended(GameStatus::Won);
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_playing()?;

        let coords = self.board.validate_coords(coords)?;
        let cell = self.board.cell_mut(coords);
        if cell.revealed {
            return Ok(MarkOutcome::NoChange);
        }
        cell.flagged = !cell.flagged;
        log::debug!("game {} flag at {:?}: {}", self.id, coords, cell.flagged);
        Ok(MarkOutcome::Changed)
    }

    /// What the player may see right now, mines are disclosed only after a loss.
    pub fn view(&self) -> GameStateView {
        project(self, self.status == GameStatus::Lost, Utc::now())
    }

    fn check_playing(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::GameFinished)
        } else {
            Ok(())
        }
    }

    fn mark_ended(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        let now = Utc::now();
        self.status = status;
        self.ended_at = Some(now);
        log::info!(
            "game {} ({}) {:?} after {}s",
            self.id,
            self.difficulty,
            status,
            self.elapsed_seconds_at(now)
        );
    }
}
