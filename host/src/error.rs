use minesweeper_common::ConfigError;
use minesweeper_engine::SessionError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Session host has stopped")]
    Closed,

    #[error("Session task failed: {0}")]
    Join(#[from] JoinError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
