use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::*;

pub const MAX_PLAYER_NAME_CHARS: usize = 50;

/// Player names are 1 to 50 characters long.
pub fn validate_player_name(name: &str) -> Result<&str> {
    let chars = name.chars().count();
    if (1..=MAX_PLAYER_NAME_CHARS).contains(&chars) {
        Ok(name)
    } else {
        Err(GameError::InvalidPlayerName)
    }
}

/// Score submitted once a game is over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewScore {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub time_seconds: f64,
    pub won: bool,
}

impl NewScore {
    pub fn validate(self) -> Result<Self> {
        validate_player_name(&self.player_name)?;
        if !self.time_seconds.is_finite() {
            return Err(GameError::InvalidScore("time must be a finite number"));
        }
        if self.time_seconds < 0.0 {
            return Err(GameError::InvalidScore("time must not be negative"));
        }
        Ok(self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: u64,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub time_seconds: f64,
    pub won: bool,
    pub created_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(id: u64, score: NewScore, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            player_name: score.player_name,
            difficulty: score.difficulty,
            time_seconds: score.time_seconds,
            won: score.won,
            created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_name: String,
    pub difficulty: Difficulty,
    pub time_seconds: f64,
    pub created_at: DateTime<Utc>,
}

/// Fastest won games of `difficulty`, ranked from 1.
///
/// Equal times keep submission order.
pub fn rank_leaderboard<'a>(
    records: impl IntoIterator<Item = &'a ScoreRecord>,
    difficulty: Difficulty,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut winners: Vec<_> = records
        .into_iter()
        .filter(|record| record.won && record.difficulty == difficulty)
        .collect();
    winners.sort_by(|a, b| {
        a.time_seconds
            .total_cmp(&b.time_seconds)
            .then(a.id.cmp(&b.id))
    });

    winners
        .into_iter()
        .take(limit)
        .zip(1..)
        .map(|(record, rank)| LeaderboardEntry {
            rank,
            player_name: record.player_name.clone(),
            difficulty: record.difficulty,
            time_seconds: record.time_seconds,
            created_at: record.created_at,
        })
        .collect()
}

/// Persistence of finished-game scores.
pub trait ScoreStore: Send + Sync {
    fn save(&self, score: NewScore) -> Result<ScoreRecord>;

    fn leaderboard(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<LeaderboardEntry>>;
}

/// Scores kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    records: Mutex<Vec<ScoreRecord>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Result<Vec<ScoreRecord>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ScoreRecord>>> {
        self.records
            .lock()
            .map_err(|_| GameError::Storage("score list lock poisoned".into()))
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save(&self, score: NewScore) -> Result<ScoreRecord> {
        let score = score.validate()?;
        let mut records = self.lock()?;
        let id = records.iter().map(|record| record.id).max().unwrap_or(0) + 1;
        let record = ScoreRecord::new(id, score, Utc::now());
        log::debug!(
            "score {} saved for {} on {}",
            record.id,
            record.player_name,
            record.difficulty
        );
        records.push(record.clone());
        Ok(record)
    }

    fn leaderboard(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        Ok(rank_leaderboard(self.lock()?.iter(), difficulty, limit))
    }
}
