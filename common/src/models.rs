use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Largest possible safe zone around the first click: the cell and its 8 neighbours.
pub const SAFE_ZONE_CELLS: usize = 9;

/// What the player sees in a single cell.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "state")]
pub enum CellView {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "flagged")]
    Flagged,
    #[serde(rename = "revealed")]
    Revealed { adjacent: u8 },
    #[serde(rename = "mine")]
    Mine,
}

/// Board coordinates. `x` is the column, `y` the row.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameParams {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            mines: 40,
        }
    }
}

impl GameParams {
    pub fn new(width: usize, height: usize, mines: usize) -> Result<Self, ConfigError> {
        let params = Self {
            width,
            height,
            mines,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    pub fn safe_cells(&self) -> usize {
        self.cells().saturating_sub(self.mines)
    }

    /// Checks that the board is non-empty and that the mines still fit once a
    /// full 3x3 safe zone has been carved out around the first click.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: self.width,
                height: self.height,
            });
        }

        let max = self.cells().saturating_sub(SAFE_ZONE_CELLS);
        if self.mines > max {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                max,
            });
        }

        Ok(())
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Best-score record handed in by the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Progress {
    pub best_score: Option<u32>,
    pub games_played: u32,
    pub games_won: u32,
}

impl Progress {
    /// Records a finished game. Returns `true` if `final_score` is a new best.
    pub fn record(&mut self, final_score: u32, won: bool) -> bool {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }

        match self.best_score {
            Some(best) if best >= final_score => false,
            _ => {
                self.best_score = Some(final_score);
                true
            }
        }
    }
}
