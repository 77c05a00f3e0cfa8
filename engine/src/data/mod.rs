use minesweeper_common::{CellView, GameParams, Pos};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cell {
    pub mine: bool,
    pub adjacent: u8,
    pub state: CellState,
}

impl Cell {
    pub(crate) const HIDDEN: Cell = Cell {
        mine: false,
        adjacent: 0,
        state: CellState::Hidden,
    };

    pub fn is_mine(&self) -> bool {
        self.mine
    }

    pub fn is_revealed(&self) -> bool {
        self.state == CellState::Revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.state == CellState::Flagged
    }

    /// Display value. With `show_mines` set, hidden mines are exposed too,
    /// which is how a lost board is presented.
    pub fn view(&self, show_mines: bool) -> CellView {
        match self.state {
            CellState::Hidden if show_mines && self.mine => CellView::Mine,
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed if self.mine => CellView::Mine,
            CellState::Revealed => CellView::Revealed {
                adjacent: self.adjacent,
            },
        }
    }
}

impl From<&Cell> for CellView {
    fn from(value: &Cell) -> Self {
        value.view(false)
    }
}

/// Row-major grid of cells with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Board {
    pub(crate) params: GameParams,
    pub(crate) populated: bool,
    pub(crate) cells: Vec<Cell>,
}

impl Board {
    pub fn params(&self) -> GameParams {
        self.params
    }

    pub fn width(&self) -> usize {
        self.params.width
    }

    pub fn height(&self) -> usize {
        self.params.height
    }

    pub fn mines(&self) -> usize {
        self.params.mines
    }

    /// Whether mines have been placed yet.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn index(&self, pos: Pos) -> Option<usize> {
        self.params
            .contains(pos)
            .then(|| pos.x + pos.y * self.params.width)
    }

    pub(crate) fn pos_of(&self, index: usize) -> Pos {
        Pos {
            x: index % self.params.width,
            y: index / self.params.width,
        }
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).and_then(|index| self.cells.get(index))
    }

    pub(crate) fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.index(pos).and_then(|index| self.cells.get_mut(index))
    }

    pub fn view(&self, pos: Pos, show_mines: bool) -> Option<CellView> {
        self.cell(pos).map(|cell| cell.view(show_mines))
    }

    pub fn rows(&self, show_mines: bool) -> Vec<Vec<CellView>> {
        self.cells
            .iter()
            .map(|cell| cell.view(show_mines))
            .collect::<Vec<CellView>>()
            .chunks(self.params.width)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    pub fn safe_cells(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.mine).count()
    }

    pub fn revealed_safe(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| !cell.mine && cell.is_revealed())
            .count()
    }

    pub fn flagged(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_flagged()).count()
    }

    pub fn correct_flags(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.mine && cell.is_flagged())
            .count()
    }

    pub fn mine_positions(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.mine)
            .map(|(index, _)| self.pos_of(index))
            .collect()
    }
}
