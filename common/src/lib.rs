//! Shared value types for the minesweeper engine and its host.

pub mod action;
pub mod config;
pub mod models;

pub use action::Action;
pub use config::ConfigError;
pub use models::{CellView, GameParams, GameStatus, Pos, Progress};
