use minesweeper_common::GameStatus;
use rand::Rng;

/// What a state-changing call did to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Updated,
    Finished { won: bool },
}

impl Transition {
    pub fn changed(self) -> bool {
        self != Transition::Unchanged
    }
}

/// The init / update / terminal-check cycle a hosted game goes through.
pub trait GameLifecycle {
    type Action;

    fn apply<R: Rng + ?Sized>(&mut self, action: Self::Action, rng: &mut R) -> Transition;

    /// Advances the game clock by one second.
    fn tick(&mut self) -> Transition;

    fn reset(&mut self);

    fn status(&self) -> GameStatus;

    fn score(&self) -> u32;

    fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Whether the clock should be running.
    fn is_running(&self) -> bool {
        self.status() == GameStatus::Playing
    }
}
