use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniformly random layout, the mines are a subset of exactly `config.mines`
/// distinct cells drawn without replacement.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        log::debug!("board generator seed: {}", seed);
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl Default for RandomBoardGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, config: BoardConfig) -> Result<Board> {
        let config = config.validate()?;
        let total_cells = config.total_cells() as usize;

        let mut mine_mask = Array2::from_elem((config.rows.into(), config.cols.into()), false);
        {
            let cells = mine_mask
                .as_slice_mut()
                .ok_or(GameError::InvalidConfiguration)?;
            for place in index::sample(&mut self.rng, total_cells, config.mines as usize) {
                cells[place] = true;
            }
        }

        let board = Board::from_mine_mask(mine_mask)?;
        log::trace!(
            "generated {}x{} board with {} safe cells",
            config.rows,
            config.cols,
            board.safe_cell_count()
        );
        // double check mine count
        if board.mine_count() != config.mines {
            log::warn!(
                "Generated board count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                config.mines
            );
        }
        Ok(board)
    }
}
