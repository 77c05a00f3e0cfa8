use minesweeper_common::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Snapshot decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(String),

    #[error("Invalid game parameters: {0}")]
    Config(#[from] ConfigError),
}
