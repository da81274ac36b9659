use std::sync::Arc;
use sweeper_core::{GameService, MemoryGameStore, MemoryScoreStore, ScoreStore};

use crate::config::Settings;
use crate::scores::JsonScoreStore;

pub type SharedState = Arc<AppState>;

/// Everything the request handlers share.
pub struct AppState {
    pub settings: Settings,
    pub games: GameService<MemoryGameStore>,
    pub scores: Arc<dyn ScoreStore>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        games: GameService<MemoryGameStore>,
        scores: Arc<dyn ScoreStore>,
    ) -> SharedState {
        Arc::new(Self {
            settings,
            games,
            scores,
        })
    }

    /// Opens the score file when one is configured.
    pub fn from_settings(settings: Settings) -> anyhow::Result<SharedState> {
        let scores: Arc<dyn ScoreStore> = match &settings.scores_path {
            Some(path) => Arc::new(JsonScoreStore::open(path)?),
            None => {
                log::warn!("no scores_path configured, scores are kept in memory only");
                Arc::new(MemoryScoreStore::new())
            }
        };
        let games = GameService::new(MemoryGameStore::new());
        Ok(Self::new(settings, games, scores))
    }
}
