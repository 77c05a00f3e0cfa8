use minesweeper_engine::{GameLifecycle, GameStatus};
use tokio::sync::mpsc;

/// Callbacks the host invokes as the session changes.
pub trait SessionObserver<G>: Send + 'static {
    /// Called after every mutation, including clock ticks and resets.
    fn on_update(&mut self, state: &G, score: u32);

    /// Called exactly once per game when it is won (`completed == true`) or lost.
    fn on_complete(&mut self, final_score: u32, completed: bool);
}

/// Events emitted by a [`ChannelObserver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The session changed
    Updated { status: GameStatus, score: u32 },
    /// The game reached a terminal state
    Completed { final_score: u32, completed: bool },
}

/// Forwards session changes into an unbounded channel.
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl<G: GameLifecycle> SessionObserver<G> for ChannelObserver {
    fn on_update(&mut self, state: &G, score: u32) {
        let _ = self.sender.send(GameEvent::Updated {
            status: state.status(),
            score,
        });
    }

    fn on_complete(&mut self, final_score: u32, completed: bool) {
        let _ = self.sender.send(GameEvent::Completed {
            final_score,
            completed,
        });
    }
}
