use crate::*;

impl Board {
    /// Reveal a cell, flooding outwards from cells with no adjacent mines.
    ///
    /// Revealed and flagged cells are left alone. A mine is revealed on its
    /// own and reported through [`RevealOutcome::hit_mine`], ending the game is
    /// up to the caller.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cell_at(coords);

        if !cell.is_hidden() {
            return Ok(RevealOutcome::NO_CHANGE);
        }

        if cell.is_mine() {
            self.cell_mut(coords).revealed = true;
            log::debug!("Hit mine at {:?}", coords);
            return Ok(RevealOutcome {
                hit_mine: true,
                revealed: 1,
            });
        }

        let revealed = self.flood_reveal(coords);
        log::debug!("Revealed {} cells from {:?}", revealed, coords);
        Ok(RevealOutcome {
            hit_mine: false,
            revealed,
        })
    }

    /// Every safe cell is revealed. Flags play no part in winning.
    pub fn is_won(&self) -> bool {
        self.iter_cells()
            .all(|(_, cell)| cell.is_revealed() || cell.is_mine())
    }

    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut revealed = 0;
        let mut to_visit = vec![start];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = self.cell_at(visit_coords);
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }

            self.cell_mut(visit_coords).revealed = true;
            revealed += 1;

            if cell.adjacent_mines() == 0 {
                log::trace!("Flood continues past {:?}", visit_coords);
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|&pos| self.cell_at(pos).is_hidden()),
                );
            }
        }

        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: Coord, cols: Coord, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(rows, cols, mines).unwrap()
    }

    #[test]
    fn flood_fill_opens_zero_region_and_its_border() {
        let mut board = board(3, 3, &[(2, 2)]);

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome { hit_mine: false, revealed: 8 });
        assert!(board.cell_at((1, 1)).is_revealed());
        assert_eq!(board.cell_at((1, 1)).adjacent_mines(), 1);
        assert!(!board.cell_at((2, 2)).is_revealed());
        assert!(board.is_won());
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut board = board(3, 3, &[(2, 2)]);

        let outcome = board.reveal((1, 1)).unwrap();

        assert_eq!(outcome.revealed, 1);
        assert_eq!(board.revealed_count(), 1);
        assert!(!board.is_won());
    }

    #[test]
    fn flood_fill_stops_at_flags() {
        let mut board = board(1, 5, &[(0, 4)]);
        board.cell_mut((0, 2)).flagged = true;

        board.reveal((0, 0)).unwrap();

        assert!(board.cell_at((0, 1)).is_revealed());
        assert!(!board.cell_at((0, 2)).is_revealed());
        assert!(!board.cell_at((0, 3)).is_revealed());
    }

    #[test]
    fn mine_reveals_only_the_mine() {
        let mut board = board(2, 2, &[(0, 0)]);

        let outcome = board.reveal((0, 0)).unwrap();

        assert!(outcome.hit_mine);
        assert!(board.cell_at((0, 0)).is_revealed());
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn second_reveal_is_a_no_op() {
        let mut board = board(4, 4, &[(3, 3)]);
        board.reveal((0, 0)).unwrap();
        let before = board.clone();

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::NO_CHANGE);
        assert_eq!(board, before);
    }

    #[test]
    fn flagged_cell_is_not_revealed() {
        let mut board = board(2, 2, &[(0, 0)]);
        board.cell_mut((0, 0)).flagged = true;

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::NO_CHANGE);
        assert!(!board.cell_at((0, 0)).is_revealed());
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut board = board(2, 2, &[]);
        assert_eq!(board.reveal((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.reveal((0, 2)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn win_ignores_flags() {
        let mut board = board(1, 3, &[(0, 0)]);
        board.cell_mut((0, 1)).flagged = true;
        assert!(!board.is_won());

        board.cell_mut((0, 1)).flagged = false;
        board.reveal((0, 2)).unwrap();
        board.reveal((0, 1)).unwrap();
        assert!(board.is_won());

        board.cell_mut((0, 0)).flagged = true;
        assert!(board.is_won());
    }

    #[test]
    fn mineless_board_is_won_by_one_reveal() {
        let mut board = board(5, 5, &[]);

        let outcome = board.reveal((2, 2)).unwrap();

        assert_eq!(outcome.revealed, 25);
        assert!(board.is_won());
    }
}
