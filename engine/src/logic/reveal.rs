use minesweeper_common::Pos;
use tracing::trace;

use crate::data::{Board, Cell, CellState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Nothing changed: out of range, already revealed, flagged, or an
    /// unsatisfied chord.
    Ignored,
    /// Number of safe cells newly revealed.
    Revealed(usize),
    /// A mine was uncovered at this position.
    Detonated(Pos),
}

impl Board {
    /// Reveals `pos`, flooding outward across zero-adjacency cells.
    ///
    /// Flagged cells are never touched and numbered cells are revealed but not
    /// expanded. A mine reveals only itself.
    pub fn reveal(&mut self, pos: Pos) -> RevealOutcome {
        let Some(cell) = self.cell_mut(pos) else {
            return RevealOutcome::Ignored;
        };

        if cell.state != CellState::Hidden {
            return RevealOutcome::Ignored;
        }

        if cell.mine {
            cell.state = CellState::Revealed;
            return RevealOutcome::Detonated(pos);
        }

        RevealOutcome::Revealed(self.flood_reveal(pos))
    }

    fn flood_reveal(&mut self, start: Pos) -> usize {
        let mut stack = vec![start];
        let mut revealed = 0;

        while let Some(pos) = stack.pop() {
            let Some(cell) = self.cell_mut(pos) else {
                continue;
            };

            if cell.state != CellState::Hidden || cell.mine {
                continue;
            }

            cell.state = CellState::Revealed;
            revealed += 1;

            if cell.adjacent == 0 {
                stack.extend(self.neighbors(pos));
            }
        }

        trace!("Flood from ({}, {}) revealed {} cells", start.x, start.y, revealed);
        revealed
    }

    /// Toggles `Hidden <-> Flagged`. Returns whether anything changed.
    pub fn toggle_flag(&mut self, pos: Pos) -> bool {
        let Some(cell) = self.cell_mut(pos) else {
            return false;
        };

        cell.state = match cell.state {
            CellState::Hidden => CellState::Flagged,
            CellState::Flagged => CellState::Hidden,
            CellState::Revealed => return false,
        };
        true
    }

    /// Reveals every hidden neighbour of a revealed number once the number of
    /// flags around it matches. A wrongly placed flag means one of those
    /// neighbours is a mine: that mine alone is revealed.
    pub fn chord(&mut self, pos: Pos) -> RevealOutcome {
        let Some(&center) = self.cell(pos) else {
            return RevealOutcome::Ignored;
        };

        if !center.is_revealed() || center.mine || center.adjacent == 0 {
            return RevealOutcome::Ignored;
        }

        let neighbors = self.neighbors(pos);
        let flagged = neighbors
            .iter()
            .filter(|&&neighbor| self.cell(neighbor).is_some_and(Cell::is_flagged))
            .count();
        if flagged != center.adjacent as usize {
            return RevealOutcome::Ignored;
        }

        let hidden: Vec<Pos> = neighbors
            .into_iter()
            .filter(|&neighbor| {
                self.cell(neighbor)
                    .is_some_and(|cell| cell.state == CellState::Hidden)
            })
            .collect();

        if let Some(&mine) = hidden
            .iter()
            .find(|&&neighbor| self.cell(neighbor).is_some_and(Cell::is_mine))
        {
            return self.reveal(mine);
        }

        let revealed: usize = hidden
            .into_iter()
            .map(|neighbor| match self.reveal(neighbor) {
                RevealOutcome::Revealed(count) => count,
                _ => 0,
            })
            .sum();

        if revealed == 0 {
            RevealOutcome::Ignored
        } else {
            RevealOutcome::Revealed(revealed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: usize, height: usize, mines: &[Pos]) -> Board {
        Board::with_mines(width, height, mines).unwrap()
    }

    #[test]
    fn flood_from_far_corner_reveals_every_safe_cell() {
        let mut board = board(4, 4, &[Pos::new(0, 0)]);

        assert_eq!(board.reveal(Pos::new(3, 3)), RevealOutcome::Revealed(15));
        assert!(!board.cell(Pos::new(0, 0)).unwrap().is_revealed());
        assert_eq!(board.revealed_safe(), 15);
    }

    #[test]
    fn flood_stops_at_numbers() {
        // Column of mines at x = 2 splits a 5x3 board.
        let mut board = board(5, 3, &[Pos::new(2, 0), Pos::new(2, 1), Pos::new(2, 2)]);

        assert_eq!(board.reveal(Pos::new(0, 1)), RevealOutcome::Revealed(6));
        for y in 0..3 {
            assert!(board.cell(Pos::new(1, y)).unwrap().is_revealed());
            assert!(!board.cell(Pos::new(3, y)).unwrap().is_revealed());
            assert!(!board.cell(Pos::new(4, y)).unwrap().is_revealed());
        }
    }

    #[test]
    fn flood_never_reveals_mines() {
        let mines = [Pos::new(3, 0), Pos::new(0, 4), Pos::new(5, 5), Pos::new(6, 2)];
        let mut board = board(8, 8, &mines);

        board.reveal(Pos::new(0, 0));
        for mine in mines {
            assert!(!board.cell(mine).unwrap().is_revealed());
        }
    }

    #[test]
    fn flood_leaves_flags_alone() {
        let mut board = board(4, 4, &[Pos::new(0, 0)]);
        assert!(board.toggle_flag(Pos::new(2, 2)));

        assert_eq!(board.reveal(Pos::new(3, 3)), RevealOutcome::Revealed(14));
        assert!(board.cell(Pos::new(2, 2)).unwrap().is_flagged());
    }

    #[test]
    fn reveal_number_does_not_expand() {
        let mut board = board(4, 4, &[Pos::new(0, 0)]);
        assert_eq!(board.reveal(Pos::new(1, 1)), RevealOutcome::Revealed(1));
    }

    #[test]
    fn reveal_mine_reveals_only_that_cell() {
        let mut board = board(4, 4, &[Pos::new(0, 0), Pos::new(3, 3)]);

        assert_eq!(board.reveal(Pos::new(0, 0)), RevealOutcome::Detonated(Pos::new(0, 0)));
        assert_eq!(board.cells().iter().filter(|c| c.is_revealed()).count(), 1);
        assert!(!board.cell(Pos::new(3, 3)).unwrap().is_revealed());
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = board(4, 4, &[Pos::new(0, 0)]);
        board.reveal(Pos::new(3, 3));

        assert_eq!(board.reveal(Pos::new(3, 3)), RevealOutcome::Ignored);
        assert_eq!(board.reveal(Pos::new(9, 9)), RevealOutcome::Ignored);

        board.toggle_flag(Pos::new(0, 0));
        assert_eq!(board.reveal(Pos::new(0, 0)), RevealOutcome::Ignored);
    }

    #[test]
    fn flag_toggles_only_hidden_cells() {
        let mut board = board(4, 4, &[Pos::new(0, 0)]);
        let before = board.clone();

        assert!(board.toggle_flag(Pos::new(1, 1)));
        assert!(board.cell(Pos::new(1, 1)).unwrap().is_flagged());
        assert!(board.toggle_flag(Pos::new(1, 1)));
        assert_eq!(board, before);

        board.reveal(Pos::new(1, 1));
        assert!(!board.toggle_flag(Pos::new(1, 1)));
        assert!(board.cell(Pos::new(1, 1)).unwrap().is_revealed());
        assert!(!board.toggle_flag(Pos::new(4, 0)));
    }

    #[test]
    fn chord_reveals_neighbors_when_flags_match() {
        let mut board = board(3, 3, &[Pos::new(0, 0)]);
        board.reveal(Pos::new(1, 1));
        board.toggle_flag(Pos::new(0, 0));

        assert_eq!(board.chord(Pos::new(1, 1)), RevealOutcome::Revealed(7));
        assert_eq!(board.revealed_safe(), 8);
        assert_eq!(board.chord(Pos::new(1, 1)), RevealOutcome::Ignored);
    }

    #[test]
    fn chord_needs_matching_flag_count() {
        let mut board = board(3, 3, &[Pos::new(0, 0)]);
        board.reveal(Pos::new(1, 1));

        assert_eq!(board.chord(Pos::new(1, 1)), RevealOutcome::Ignored);
        assert_eq!(board.revealed_safe(), 1);
    }

    #[test]
    fn chord_with_wrong_flag_detonates() {
        let mut board = board(3, 3, &[Pos::new(0, 0)]);
        board.reveal(Pos::new(1, 1));
        board.toggle_flag(Pos::new(2, 2));

        assert_eq!(board.chord(Pos::new(1, 1)), RevealOutcome::Detonated(Pos::new(0, 0)));
        assert_eq!(board.revealed_safe(), 1);
    }

    #[test]
    fn chord_ignores_hidden_and_empty_cells() {
        let mut board = board(4, 4, &[Pos::new(0, 0)]);
        assert_eq!(board.chord(Pos::new(1, 1)), RevealOutcome::Ignored);

        board.reveal(Pos::new(3, 3));
        assert_eq!(board.chord(Pos::new(3, 3)), RevealOutcome::Ignored);
    }
}
