use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use sweeper_core::*;

/// Scores mirrored to a JSON file, rewritten on every save.
///
/// A record only becomes visible once the file write has succeeded.
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    records: Mutex<Vec<ScoreRecord>>,
}

impl JsonScoreStore {
    /// A missing file starts an empty list.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records: Vec<ScoreRecord> = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                GameError::Storage(format!("could not parse {}: {}", path.display(), err))
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no score file at {}, starting empty", path.display());
                Vec::new()
            }
            Err(err) => return Err(storage_error(&path, err)),
        };
        log::debug!("loaded {} scores from {}", records.len(), path.display());

        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ScoreRecord>>> {
        self.records
            .lock()
            .map_err(|_| GameError::Storage("score list lock poisoned".into()))
    }

    fn write(&self, records: &[ScoreRecord]) -> Result<()> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|err| GameError::Storage(err.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|err| storage_error(&tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| storage_error(&self.path, err))
    }
}

fn storage_error(path: &Path, err: std::io::Error) -> GameError {
    GameError::Storage(format!("{}: {}", path.display(), err))
}

impl ScoreStore for JsonScoreStore {
    fn save(&self, score: NewScore) -> Result<ScoreRecord> {
        let score = score.validate()?;
        let mut records = self.lock()?;
        let id = records.iter().map(|record| record.id).max().unwrap_or(0) + 1;
        let record = ScoreRecord::new(id, score, Utc::now());

        records.push(record.clone());
        if let Err(err) = self.write(&records) {
            records.pop();
            return Err(err);
        }
        log::debug!("score {} written to {}", record.id, self.path.display());
        Ok(record)
    }

    fn leaderboard(&self, difficulty: Difficulty, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        Ok(rank_leaderboard(self.lock()?.iter(), difficulty, limit))
    }
}
