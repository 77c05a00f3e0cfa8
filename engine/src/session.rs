use minesweeper_common::{Action, CellView, ConfigError, GameParams, GameStatus, Pos};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    data::{Board, CellState},
    error::SessionError,
    lifecycle::{GameLifecycle, Transition},
    logic::reveal::RevealOutcome,
    score::ScoreWeights,
};

/// One game of minesweeper from first click to win or loss.
///
/// Mines are placed lazily on the first reveal so that the clicked cell and its
/// neighbours are always safe. All mutation goes through the transition
/// methods, each of which is a no-op once the game is over.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameSession {
    id: Uuid,
    board: Board,
    revealed_safe_count: usize,
    flag_count: usize,
    status: GameStatus,
    elapsed_seconds: u64,
    #[serde(default)]
    weights: ScoreWeights,
}

impl GameSession {
    #[instrument(level = "trace")]
    pub fn new(params: GameParams) -> Result<Self, ConfigError> {
        params.validate()?;
        info!(
            "Creating new game: {}x{} with {} mines",
            params.width, params.height, params.mines
        );
        Ok(Self::fresh(Board::empty(params)))
    }

    /// Starts a session on a prepared board. A populated board is played as-is
    /// instead of being generated around the first click. Flags already on the
    /// board are kept; a board with revealed cells is rejected.
    pub fn with_board(board: Board) -> Result<Self, SessionError> {
        let session = Self::fresh(board);
        session.check_consistency()?;
        Ok(session)
    }

    fn fresh(board: Board) -> Self {
        Self {
            id: Uuid::new_v4(),
            revealed_safe_count: board.revealed_safe(),
            flag_count: board.flagged(),
            board,
            status: GameStatus::NotStarted,
            elapsed_seconds: 0,
            weights: ScoreWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn params(&self) -> GameParams {
        self.board.params()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn started(&self) -> bool {
        self.status != GameStatus::NotStarted
    }

    pub fn game_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn win(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn revealed_safe_count(&self) -> usize {
        self.revealed_safe_count
    }

    pub fn flag_count(&self) -> usize {
        self.flag_count
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn total_safe_cells(&self) -> usize {
        if self.board.is_populated() {
            self.board.safe_cells()
        } else {
            self.params().safe_cells()
        }
    }

    pub fn mines_left(&self) -> isize {
        self.params().mines as isize - self.flag_count as isize
    }

    pub fn correct_flags(&self) -> usize {
        self.board.correct_flags()
    }

    pub fn score(&self) -> u32 {
        self.weights.score(
            self.revealed_safe_count,
            self.correct_flags(),
            self.elapsed_seconds,
        )
    }

    /// The board as the player sees it; mines are exposed after a loss.
    pub fn view(&self) -> Vec<Vec<CellView>> {
        self.board.rows(self.status == GameStatus::Lost)
    }

    fn accepts_move(&self, pos: Pos, action: &str) -> bool {
        if !self.params().contains(pos) {
            warn!("Invalid {} position: ({}, {})", action, pos.x, pos.y);
            return false;
        }

        if self.game_over() {
            debug!(
                "Ignoring {} action on finished game at ({}, {})",
                action, pos.x, pos.y
            );
            return false;
        }

        true
    }

    #[instrument(level = "trace", skip(self, rng), fields(x = pos.x, y = pos.y))]
    pub fn reveal<R: Rng + ?Sized>(&mut self, pos: Pos, rng: &mut R) -> Transition {
        if !self.accepts_move(pos, "reveal") {
            return Transition::Unchanged;
        }

        if self.status == GameStatus::NotStarted {
            if self.board.cell(pos).is_some_and(|cell| cell.is_flagged()) {
                debug!("Ignoring reveal on flagged cell ({}, {})", pos.x, pos.y);
                return Transition::Unchanged;
            }

            if !self.board.is_populated() {
                self.board.populate(pos, rng);
            }
            self.status = GameStatus::Playing;
            info!("Game {} started at ({}, {})", self.id, pos.x, pos.y);
        }

        let outcome = self.board.reveal(pos);
        self.apply_outcome(outcome)
    }

    #[instrument(level = "trace", skip(self), fields(x = pos.x, y = pos.y))]
    pub fn chord(&mut self, pos: Pos) -> Transition {
        if !self.accepts_move(pos, "chord") || self.status != GameStatus::Playing {
            return Transition::Unchanged;
        }

        let outcome = self.board.chord(pos);
        self.apply_outcome(outcome)
    }

    #[instrument(level = "trace", skip(self), fields(x = pos.x, y = pos.y))]
    pub fn toggle_flag(&mut self, pos: Pos) -> Transition {
        if !self.accepts_move(pos, "flag") {
            return Transition::Unchanged;
        }

        if !self.board.toggle_flag(pos) {
            debug!("Ignoring flag action on revealed cell ({}, {})", pos.x, pos.y);
            return Transition::Unchanged;
        }

        if self.board.cell(pos).is_some_and(|cell| cell.is_flagged()) {
            self.flag_count += 1;
            debug!("Cell ({}, {}) flagged", pos.x, pos.y);
        } else {
            self.flag_count -= 1;
            debug!("Cell ({}, {}) unflagged", pos.x, pos.y);
        }
        Transition::Updated
    }

    /// Adds one second to the clock while the game is running.
    pub fn tick(&mut self) -> Transition {
        if self.status != GameStatus::Playing {
            return Transition::Unchanged;
        }

        self.elapsed_seconds += 1;
        Transition::Updated
    }

    /// Throws the board away and starts over with the same parameters.
    #[instrument(level = "trace", skip(self))]
    pub fn reset(&mut self) {
        let params = self.params();
        info!(
            "Restarting game with parameters: {}x{} with {} mines",
            params.width, params.height, params.mines
        );
        *self = Self::fresh(Board::empty(params)).with_weights(self.weights);
    }

    fn apply_outcome(&mut self, outcome: RevealOutcome) -> Transition {
        match outcome {
            RevealOutcome::Ignored => Transition::Unchanged,
            RevealOutcome::Detonated(pos) => {
                warn!("Player hit mine at ({}, {}) - game over!", pos.x, pos.y);
                self.status = GameStatus::Lost;
                info!("Game {} lost with score {}", self.id, self.score());
                Transition::Finished { won: false }
            }
            RevealOutcome::Revealed(count) => {
                self.revealed_safe_count += count;
                if self.revealed_safe_count == self.total_safe_cells() {
                    self.finish_won();
                    Transition::Finished { won: true }
                } else {
                    debug!("Revealed {} cells, game continues", count);
                    Transition::Updated
                }
            }
        }
    }

    fn finish_won(&mut self) {
        for cell in self.board.cells.iter_mut() {
            if cell.mine && cell.state == CellState::Hidden {
                cell.state = CellState::Flagged;
            }
        }
        self.flag_count = self.board.flagged();
        self.status = GameStatus::Won;
        info!(
            "Game {} won in {}s with score {}",
            self.id,
            self.elapsed_seconds,
            self.score()
        );
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a session saved with [`GameSession::to_json`], rejecting
    /// snapshots whose counters or status disagree with the board.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let session: Self = serde_json::from_str(json)?;
        session.check_consistency()?;
        Ok(session)
    }

    fn check_consistency(&self) -> Result<(), SessionError> {
        let params = self.params();
        let inconsistent =
            |message: String| -> Result<(), SessionError> { Err(SessionError::Inconsistent(message)) };

        if params.width == 0 || params.height == 0 || self.board.cells.len() != params.cells() {
            return inconsistent(format!(
                "{} cells stored for a {}x{} board",
                self.board.cells.len(),
                params.width,
                params.height
            ));
        }

        if !self.board.is_populated() {
            params.validate()?;
            if self.status != GameStatus::NotStarted {
                return inconsistent(format!("status {:?} without mines placed", self.status));
            }
        }

        let mines = self.board.mine_positions().len();
        let expected_mines = if self.board.is_populated() { params.mines } else { 0 };
        if mines != expected_mines {
            return inconsistent(format!("{} mines on the board, expected {}", mines, expected_mines));
        }

        if self.revealed_safe_count != self.board.revealed_safe() {
            return inconsistent(format!(
                "revealed count {} does not match board ({})",
                self.revealed_safe_count,
                self.board.revealed_safe()
            ));
        }

        if self.flag_count != self.board.flagged() {
            return inconsistent(format!(
                "flag count {} does not match board ({})",
                self.flag_count,
                self.board.flagged()
            ));
        }

        let detonated = self
            .board
            .cells()
            .iter()
            .any(|cell| cell.mine && cell.is_revealed());
        let status_matches = match self.status {
            GameStatus::NotStarted => self.revealed_safe_count == 0 && self.elapsed_seconds == 0,
            GameStatus::Playing => {
                !detonated && self.revealed_safe_count < self.total_safe_cells()
            }
            GameStatus::Won => !detonated && self.revealed_safe_count == self.total_safe_cells(),
            GameStatus::Lost => detonated,
        };
        if !status_matches {
            return inconsistent(format!("status {:?} does not match board", self.status));
        }

        Ok(())
    }
}

impl GameLifecycle for GameSession {
    type Action = Action;

    fn apply<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> Transition {
        match action {
            Action::Reveal { pos } => self.reveal(pos, rng),
            Action::Flag { pos } => self.toggle_flag(pos),
            Action::Chord { pos } => self.chord(pos),
        }
    }

    fn tick(&mut self) -> Transition {
        GameSession::tick(self)
    }

    fn reset(&mut self) {
        GameSession::reset(self)
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        GameSession::score(self)
    }
}
