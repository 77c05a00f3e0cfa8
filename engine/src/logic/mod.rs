use std::collections::HashSet;

use minesweeper_common::{ConfigError, GameParams, Pos};
use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::data::{Board, Cell};

pub mod reveal;

/// In-bounds cells around `pos`, excluding `pos` itself.
pub fn neighbors(pos: Pos, width: usize, height: usize) -> Vec<Pos> {
    let mut neighbors = Vec::with_capacity(8);

    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }

            let new_x = pos.x as i64 + dx;
            let new_y = pos.y as i64 + dy;

            if new_x >= 0 && new_x < width as i64 && new_y >= 0 && new_y < height as i64 {
                neighbors.push(Pos {
                    x: new_x as usize,
                    y: new_y as usize,
                });
            }
        }
    }

    neighbors
}

fn in_safe_zone(pos: Pos, seed: Pos) -> bool {
    pos.x.abs_diff(seed.x) <= 1 && pos.y.abs_diff(seed.y) <= 1
}

impl Board {
    /// A board with every cell hidden and no mines placed yet.
    pub fn empty(params: GameParams) -> Self {
        Self {
            params,
            populated: false,
            cells: vec![Cell::HIDDEN; params.cells()],
        }
    }

    /// Generates a populated board whose `seed` cell and its neighbours are mine-free.
    pub fn generate<R: Rng + ?Sized>(params: GameParams, seed: Pos, rng: &mut R) -> Self {
        let mut board = Self::empty(params);
        board.populate(seed, rng);
        board
    }

    /// Builds a board with mines at exactly the given positions.
    pub fn with_mines(width: usize, height: usize, mines: &[Pos]) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }

        let params = GameParams {
            width,
            height,
            mines: mines.len(),
        };
        let mut board = Self::empty(params);
        let mut seen = HashSet::with_capacity(mines.len());

        for &pos in mines {
            let index = board
                .index(pos)
                .filter(|_| seen.insert(pos))
                .ok_or(ConfigError::InvalidMine { x: pos.x, y: pos.y })?;
            board.cells[index].mine = true;
        }

        board.populated = true;
        board.compute_adjacency();
        Ok(board)
    }

    pub fn neighbors(&self, pos: Pos) -> Vec<Pos> {
        neighbors(pos, self.params.width, self.params.height)
    }

    /// Places the configured number of mines uniformly among the cells outside
    /// the 3x3 zone around `seed`, then computes adjacency counts.
    ///
    /// Uses selection sampling: each candidate becomes a mine with probability
    /// `mines_left / candidates_left`, which yields exactly `mines` mines.
    #[instrument(level = "trace", skip(self, rng), fields(x = seed.x, y = seed.y))]
    pub fn populate<R: Rng + ?Sized>(&mut self, seed: Pos, rng: &mut R) {
        if self.populated {
            warn!("Ignoring populate on a board that already has mines");
            return;
        }

        let width = self.params.width;
        let pos_of = |index: usize| Pos {
            x: index % width,
            y: index / width,
        };

        let mut candidates_left = (0..self.cells.len())
            .filter(|&index| !in_safe_zone(pos_of(index), seed))
            .count();
        let mut mines_left = self.params.mines.min(candidates_left);
        if mines_left < self.params.mines {
            warn!(
                "Only {} cells outside the safe zone, placing {} of {} mines",
                candidates_left, mines_left, self.params.mines
            );
            self.params.mines = mines_left;
        }

        for (index, cell) in self.cells.iter_mut().enumerate() {
            if in_safe_zone(pos_of(index), seed) {
                continue;
            }

            let value = rng.random_ratio(mines_left as u32, candidates_left as u32);
            candidates_left -= 1;
            cell.mine = value;
            if value {
                mines_left -= 1;
            }
        }

        self.populated = true;
        self.compute_adjacency();
        debug!(
            "Placed {} mines on {}x{} board around seed ({}, {})",
            self.params.mines - mines_left,
            self.params.width,
            self.params.height,
            seed.x,
            seed.y
        );
    }

    fn count_adjacent_mines(&self, pos: Pos) -> u8 {
        self.neighbors(pos)
            .into_iter()
            .filter(|&neighbor| self.cell(neighbor).is_some_and(Cell::is_mine))
            .count() as u8
    }

    pub(crate) fn compute_adjacency(&mut self) {
        let counts: Vec<u8> = (0..self.cells.len())
            .map(|index| {
                if self.cells[index].mine {
                    0
                } else {
                    self.count_adjacent_mines(self.pos_of(index))
                }
            })
            .collect();

        for (cell, adjacent) in self.cells.iter_mut().zip(counts) {
            cell.adjacent = adjacent;
        }
    }
}
