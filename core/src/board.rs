use core::ops::Index;
use ndarray::Array2;

use crate::*;

/// Grid of cells with a fixed mine layout.
///
/// Cells are stored row-major, so the flat index of `(row, col)` is
/// `row * cols + col`.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a mine mask and fills in the adjacency counts.
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let rows: Coord = rows.try_into().map_err(|_| GameError::InvalidConfiguration)?;
        let cols: Coord = cols.try_into().map_err(|_| GameError::InvalidConfiguration)?;
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        BoardConfig::new(rows, cols, mine_count).validate()?;

        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let is_mine = mine_mask[[row, col]];
            let adjacent_mines = if is_mine {
                0
            } else {
                mine_mask
                    .iter_neighbors(coords)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8
            };
            Cell {
                is_mine,
                adjacent_mines,
                ..Default::default()
            }
        });

        Ok(Self { cells, mine_count })
    }

    /// Deterministic layout from explicit mine coordinates, duplicates count once.
    pub fn from_mine_coords(rows: Coord, cols: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidConfiguration);
        }

        let mut mine_mask = Array2::from_elem((rows.into(), cols.into()), false);
        for &(row, col) in mine_coords {
            if row >= rows || col >= cols {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[(row, col).to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    /// Deterministic layout from flat `row * cols + col` indices.
    pub fn from_mine_indices(rows: Coord, cols: Coord, mine_indices: &[usize]) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidConfiguration);
        }

        let total = usize::from(rows) * usize::from(cols);
        let mut mine_mask = Array2::from_elem((rows.into(), cols.into()), false);
        {
            let flat = mine_mask
                .as_slice_mut()
                .ok_or(GameError::InvalidConfiguration)?;
            for &index in mine_indices {
                if index >= total {
                    return Err(GameError::OutOfBounds);
                }
                flat[index] = true;
            }
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn config(&self) -> BoardConfig {
        let (rows, cols) = self.size();
        BoardConfig::new(rows, cols, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// All cells in row-major order together with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.revealed).count() as CellCount
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.flagged).count() as CellCount
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
