use dashmap::DashMap;

use crate::*;

/// Keyed storage of live games.
///
/// Implementations must be safe to share between request handlers.
/// `with_game_mut` holds exclusive access to that one game for the duration
/// of the closure, which is what serializes moves racing on the same id.
pub trait GameStore: Send + Sync {
    fn insert(&self, game: Game) -> GameId;

    fn with_game<R>(&self, id: &GameId, f: impl FnOnce(&Game) -> R) -> Result<R>;

    fn with_game_mut<R>(&self, id: &GameId, f: impl FnOnce(&mut Game) -> R) -> Result<R>;

    fn remove(&self, id: &GameId) -> Option<Game>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Games kept for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: DashMap<GameId, Game>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for MemoryGameStore {
    fn insert(&self, game: Game) -> GameId {
        let id = game.id().clone();
        if self.games.insert(id.clone(), game).is_some() {
            log::warn!("game {} replaced an existing entry", id);
        }
        id
    }

    fn with_game<R>(&self, id: &GameId, f: impl FnOnce(&Game) -> R) -> Result<R> {
        let game = self.games.get(id).ok_or(GameError::GameNotFound)?;
        Ok(f(&game))
    }

    fn with_game_mut<R>(&self, id: &GameId, f: impl FnOnce(&mut Game) -> R) -> Result<R> {
        let mut game = self.games.get_mut(id).ok_or(GameError::GameNotFound)?;
        Ok(f(&mut game))
    }

    fn remove(&self, id: &GameId) -> Option<Game> {
        self.games.remove(id).map(|(_, game)| game)
    }

    fn len(&self) -> usize {
        self.games.len()
    }
}
