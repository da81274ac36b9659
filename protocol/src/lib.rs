//! Request and response bodies of the sweeper HTTP API.
//!
//! Game state, score and leaderboard payloads are the core types themselves
//! and are re-exported here so clients only need this crate.

use serde::{Deserialize, Serialize};

pub use sweeper_core::{
    CellView, Coord, Difficulty, GameId, GameStateView, GameStatus, LeaderboardEntry, NewScore,
    ScoreRecord,
};

/// Prefix shared by every versioned route.
pub const API_PREFIX: &str = "/api/v1";

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
pub const MAX_LEADERBOARD_LIMIT: usize = 50;

/// Body of `POST /game/new`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGameRequest {
    #[serde(default)]
    pub difficulty: Difficulty,
    pub player_name: String,
}

/// Body of the reveal and flag routes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRequest {
    pub row: Coord,
    pub col: Coord,
}

/// Query of `GET /leaderboard/{difficulty}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_LEADERBOARD_LIMIT
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

impl LeaderboardQuery {
    pub fn is_valid(&self) -> bool {
        (1..=MAX_LEADERBOARD_LIMIT).contains(&self.limit)
    }
}

/// Body returned with every non-2xx response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Body of `GET /`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub app: String,
    pub version: String,
    pub status: String,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
        }
    }
}
