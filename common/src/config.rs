use std::{env, str::FromStr};

use thiserror::Error;
use tracing::debug;

use crate::models::GameParams;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },

    #[error("{mines} mines do not fit on this board (at most {max})")]
    TooManyMines { mines: usize, max: usize },

    #[error("mine position ({x}, {y}) is outside the board or listed twice")]
    InvalidMine { x: usize, y: usize },

    #[error("invalid value {value:?} for {var}")]
    Env { var: &'static str, value: String },
}

pub const WIDTH_VAR: &str = "MINESWEEPER_WIDTH";
pub const HEIGHT_VAR: &str = "MINESWEEPER_HEIGHT";
pub const MINES_VAR: &str = "MINESWEEPER_MINES";
pub const SEED_VAR: &str = "MINESWEEPER_SEED";

fn parse_value<T: FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Env { var, value }),
    }
}

fn read_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    parse_value(var, env::var(var).ok(), default)
}

impl GameParams {
    /// Reads board dimensions from the environment, keeping the defaults for
    /// unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let params = Self {
            width: read_var(WIDTH_VAR, defaults.width)?,
            height: read_var(HEIGHT_VAR, defaults.height)?,
            mines: read_var(MINES_VAR, defaults.mines)?,
        };
        params.validate()?;

        debug!(
            "Loaded game params from environment: {}x{} with {} mines",
            params.width, params.height, params.mines
        );
        Ok(params)
    }
}

/// Fixed RNG seed for reproducible boards, if one is configured.
pub fn seed_from_env() -> Result<Option<u64>, ConfigError> {
    match env::var(SEED_VAR).ok() {
        None => Ok(None),
        seed => parse_value(SEED_VAR, seed, 0u64).map(Some),
    }
}
