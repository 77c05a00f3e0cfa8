//! Minesweeper board engine: safe-first-click generation, flood-fill reveal,
//! scoring and the [`GameSession`] state machine that ties them together.
//!
//! ```
//! use minesweeper_engine::{GameSession, GameParams, Pos};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut session = GameSession::new(GameParams::default())?;
//! session.reveal(Pos::new(8, 8), &mut rng);
//! assert!(session.started());
//! assert!(!session.game_over());
//! # Ok::<(), minesweeper_engine::ConfigError>(())
//! ```

pub mod data;
pub mod error;
pub mod lifecycle;
pub mod logic;
pub mod score;
pub mod session;

pub use data::{Board, Cell, CellState};
pub use error::SessionError;
pub use lifecycle::{GameLifecycle, Transition};
pub use logic::reveal::RevealOutcome;
pub use score::{ScoreWeights, score};
pub use session::GameSession;

pub use minesweeper_common::{
    Action, CellView, ConfigError, GameParams, GameStatus, Pos, Progress,
};
