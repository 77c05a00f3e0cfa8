//! Minesweeper Session Host
//!
//! Runs a single game session on a tokio task. The task is the only owner of
//! the session: player actions arrive over a channel, a one-second clock runs
//! while the game is in progress, and every change is reported to a
//! [`SessionObserver`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use minesweeper_host::{ChannelObserver, GameEvent, GameHandle, HostConfig, Pos, Progress};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let config = HostConfig::from_env()?;
//!     let (observer, mut events) = ChannelObserver::new();
//!
//!     // Start a fresh game, or pass a saved session to resume it
//!     let game = GameHandle::start(&config, None, Progress::default(), observer)?;
//!
//!     game.reveal(Pos::new(8, 8))?;
//!     game.flag(Pos::new(0, 0))?;
//!
//!     while let Some(event) = events.recv().await {
//!         if let GameEvent::Completed { final_score, completed } = event {
//!             println!("Finished with {} points (won: {})", final_score, completed);
//!             break;
//!         }
//!     }
//!
//!     let (session, progress) = game.shutdown().await?;
//!     println!("Best score: {:?} after {}s", progress.best_score, session.elapsed_seconds());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod game;
mod observer;

pub use config::HostConfig;
pub use error::HostError;
pub use game::GameHandle;
pub use observer::{ChannelObserver, GameEvent, SessionObserver};

// Re-export engine types for convenience
pub use minesweeper_engine::{
    Action, CellView, GameLifecycle, GameParams, GameSession, GameStatus, Pos, Progress,
    Transition,
};

pub type Result<T> = std::result::Result<T, HostError>;
