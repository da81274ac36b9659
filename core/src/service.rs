use std::sync::Mutex;

use crate::*;

/// Entry point for the game operations exposed over the API.
///
/// Games live in `S`; boards come from `G`, which sits behind a mutex so the
/// service can be shared across request handlers.
#[derive(Debug)]
pub struct GameService<S, G = RandomBoardGenerator> {
    store: S,
    generator: Mutex<G>,
}

impl<S: GameStore> GameService<S> {
    pub fn new(store: S) -> Self {
        Self::with_generator(store, RandomBoardGenerator::from_entropy())
    }
}

impl<S: GameStore, G: BoardGenerator> GameService<S, G> {
    pub fn with_generator(store: S, generator: G) -> Self {
        Self {
            store,
            generator: Mutex::new(generator),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create_game(&self, difficulty: Difficulty, player_name: &str) -> Result<GameStateView> {
        let player_name = validate_player_name(player_name)?;
        let board = self
            .generator
            .lock()
            .map_err(|_| GameError::Storage("board generator lock poisoned".into()))?
            .generate(difficulty.config())?;

        let game = Game::new(difficulty, player_name, board);
        let view = game.view();
        let id = self.store.insert(game);
        log::debug!("created {} game {} for {}", difficulty, id, player_name);
        Ok(view)
    }

    pub fn get_game(&self, id: &GameId) -> Result<GameStateView> {
        self.store.with_game(id, Game::view)
    }

    pub fn reveal_cell(&self, id: &GameId, row: Coord, col: Coord) -> Result<GameStateView> {
        self.store.with_game_mut(id, |game| -> Result<GameStateView> {
            let outcome = game.reveal((row, col))?;
            log::debug!("game {} reveal ({}, {}): {:?}", id, row, col, outcome);
            Ok(game.view())
        })?
    }

    pub fn toggle_flag(&self, id: &GameId, row: Coord, col: Coord) -> Result<GameStateView> {
        self.store.with_game_mut(id, |game| -> Result<GameStateView> {
            if !game.toggle_flag((row, col))?.has_update() {
                log::debug!(
                    "game {} flag ({}, {}) ignored on revealed cell, {} flags placed",
                    id,
                    row,
                    col,
                    game.board().flagged_count()
                );
            }
            Ok(game.view())
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out one fixed layout regardless of the requested config.
    struct FixedGenerator(Board);

    impl BoardGenerator for FixedGenerator {
        fn generate(&mut self, _config: BoardConfig) -> Result<Board> {
            Ok(self.0.clone())
        }
    }

    fn fixed_service(mines: &[Coord2]) -> GameService<MemoryGameStore, FixedGenerator> {
        let board = Board::from_mine_coords(3, 3, mines).unwrap();
        GameService::with_generator(MemoryGameStore::new(), FixedGenerator(board))
    }

    #[test]
    fn create_game_returns_safe_initial_view() {
        let service = GameService::new(MemoryGameStore::new());

        let view = service.create_game(Difficulty::Medium, "ada").unwrap();

        assert_eq!((view.rows, view.cols, view.mines), (16, 16, 40));
        assert_eq!(view.status, GameStatus::Playing);
        assert_eq!(view.player_name, "ada");
        assert!(view.cells.iter().all(|cell| !cell.revealed && !cell.is_mine));
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn create_game_rejects_bad_names() {
        let service = GameService::new(MemoryGameStore::new());

        assert_eq!(
            service.create_game(Difficulty::Easy, ""),
            Err(GameError::InvalidPlayerName)
        );
        assert!(service.store().is_empty());
    }

    #[test]
    fn get_game_round_trips_through_the_store() {
        let service = fixed_service(&[(2, 2)]);
        let created = service.create_game(Difficulty::Easy, "ada").unwrap();

        let fetched = service.get_game(&created.game_id).unwrap();

        assert_eq!(fetched.game_id, created.game_id);
        assert_eq!(fetched.cells, created.cells);
        assert_eq!(
            service.get_game(&GameId::from("missing")),
            Err(GameError::GameNotFound)
        );
    }

    #[test]
    fn losing_reveal_discloses_mines_and_locks_the_game() {
        let service = fixed_service(&[(0, 0), (2, 2)]);
        let id = service.create_game(Difficulty::Easy, "ada").unwrap().game_id;

        let view = service.reveal_cell(&id, 0, 0).unwrap();
        assert_eq!(view.status, GameStatus::Lost);
        assert!(view.cell((2, 2)).unwrap().is_mine);

        assert_eq!(service.reveal_cell(&id, 1, 1), Err(GameError::GameFinished));
        assert_eq!(service.toggle_flag(&id, 1, 1), Err(GameError::GameFinished));
        assert_eq!(service.get_game(&id).unwrap().status, GameStatus::Lost);
    }

    #[test]
    fn winning_reveal_keeps_mines_hidden() {
        let service = fixed_service(&[(2, 2)]);
        let id = service.create_game(Difficulty::Easy, "ada").unwrap().game_id;

        let view = service.reveal_cell(&id, 0, 0).unwrap();

        assert_eq!(view.status, GameStatus::Won);
        assert!(!view.cell((2, 2)).unwrap().is_mine);
    }

    #[test]
    fn flag_round_trip() {
        let service = fixed_service(&[(2, 2)]);
        let id = service.create_game(Difficulty::Easy, "ada").unwrap().game_id;

        assert!(service.toggle_flag(&id, 2, 2).unwrap().cell((2, 2)).unwrap().flagged);
        assert!(!service.toggle_flag(&id, 2, 2).unwrap().cell((2, 2)).unwrap().flagged);
    }

    #[test]
    fn flag_on_revealed_cell_leaves_view_unchanged() {
        let service = fixed_service(&[(2, 2)]);
        let id = service.create_game(Difficulty::Easy, "ada").unwrap().game_id;
        let revealed = service.reveal_cell(&id, 1, 1).unwrap();

        let view = service.toggle_flag(&id, 1, 1).unwrap();

        assert_eq!(view.cells, revealed.cells);
        assert!(!view.cell((1, 1)).unwrap().flagged);
        assert_eq!(view.status, GameStatus::Playing);
    }

    #[test]
    fn out_of_bounds_moves_are_reported() {
        let service = fixed_service(&[(2, 2)]);
        let id = service.create_game(Difficulty::Easy, "ada").unwrap().game_id;

        assert_eq!(service.reveal_cell(&id, 3, 0), Err(GameError::OutOfBounds));
        assert_eq!(service.toggle_flag(&id, 0, 3), Err(GameError::OutOfBounds));
        assert_eq!(service.get_game(&id).unwrap().status, GameStatus::Playing);
    }
}
