use std::time::Duration;

use minesweeper_common::{Action, Pos, Progress};
use minesweeper_engine::{GameLifecycle, GameSession, Transition};
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval};
use tracing::{debug, info, warn};

use crate::{HostConfig, HostError, Result, observer::SessionObserver};

const TICK: Duration = Duration::from_secs(1);

enum Command<G: GameLifecycle> {
    Act(G::Action),
    Reset,
    Snapshot(oneshot::Sender<G>),
    Progress(oneshot::Sender<Progress>),
}

/// Handle to a session running on its own tokio task.
///
/// Dropping every handle stops the task; [`GameHandle::shutdown`] does the same
/// and hands back the final session and progress.
pub struct GameHandle<G: GameLifecycle> {
    commands: mpsc::UnboundedSender<Command<G>>,
    task: JoinHandle<(G, Progress)>,
}

impl<G> GameHandle<G>
where
    G: GameLifecycle + Clone + Send + 'static,
    G::Action: Send + 'static,
{
    /// Spawns the host task. Must be called from within a tokio runtime.
    pub fn spawn<O: SessionObserver<G>>(
        session: G,
        progress: Progress,
        observer: O,
        rng: StdRng,
    ) -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        let host = Host {
            completed: session.is_terminal(),
            session,
            progress,
            observer,
            rng,
        };
        let task = tokio::spawn(host.run(receiver));

        Self { commands, task }
    }

    fn send(&self, command: Command<G>) -> Result<()> {
        self.commands.send(command).map_err(|_| HostError::Closed)
    }

    pub fn act(&self, action: G::Action) -> Result<()> {
        self.send(Command::Act(action))
    }

    /// Starts a new game with the same parameters.
    pub fn reset(&self) -> Result<()> {
        self.send(Command::Reset)
    }

    /// A copy of the session as of every command sent before this call.
    pub async fn snapshot(&self) -> Result<G> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot(reply))?;
        response.await.map_err(|_| HostError::Closed)
    }

    pub async fn progress(&self) -> Result<Progress> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Progress(reply))?;
        response.await.map_err(|_| HostError::Closed)
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the host and returns the final session and progress.
    pub async fn shutdown(self) -> Result<(G, Progress)> {
        drop(self.commands);
        Ok(self.task.await?)
    }
}

impl GameHandle<GameSession> {
    /// Starts hosting `initial_state`, or a fresh game built from `config`.
    ///
    /// Fails without spawning anything when `config.params` cannot make a board.
    pub fn start<O: SessionObserver<GameSession>>(
        config: &HostConfig,
        initial_state: Option<GameSession>,
        progress: Progress,
        observer: O,
    ) -> Result<Self> {
        let session = match initial_state {
            Some(session) => {
                info!("Resuming game {} ({:?})", session.id(), session.status());
                session
            }
            None => GameSession::new(config.params)?,
        };
        Ok(Self::spawn(session, progress, observer, config.rng()))
    }

    /// Resumes a session saved with [`GameSession::to_json`].
    pub fn resume_json<O: SessionObserver<GameSession>>(
        config: &HostConfig,
        json: &str,
        progress: Progress,
        observer: O,
    ) -> Result<Self> {
        let session = GameSession::from_json(json)?;
        Self::start(config, Some(session), progress, observer)
    }

    pub fn reveal(&self, pos: Pos) -> Result<()> {
        debug!("Revealing cell at ({}, {})", pos.x, pos.y);
        self.act(Action::Reveal { pos })
    }

    pub fn flag(&self, pos: Pos) -> Result<()> {
        debug!("Flagging cell at ({}, {})", pos.x, pos.y);
        self.act(Action::Flag { pos })
    }

    pub fn chord(&self, pos: Pos) -> Result<()> {
        debug!("Chording cell at ({}, {})", pos.x, pos.y);
        self.act(Action::Chord { pos })
    }
}

struct Host<G, O> {
    session: G,
    progress: Progress,
    observer: O,
    rng: StdRng,
    completed: bool,
}

/// Resolves on the next clock tick, or never while the clock is stopped.
async fn next_tick(clock: &mut Option<Interval>) {
    match clock {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

impl<G, O> Host<G, O>
where
    G: GameLifecycle + Clone,
    O: SessionObserver<G>,
{
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command<G>>) -> (G, Progress) {
        let mut clock = None;
        self.sync_clock(&mut clock);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = next_tick(&mut clock) => {
                    let transition = self.session.tick();
                    self.after(transition);
                }
            }

            self.sync_clock(&mut clock);
        }

        info!("Session host stopped");
        (self.session, self.progress)
    }

    /// The clock exists only while the game is running; stopping it drops the interval.
    fn sync_clock(&self, clock: &mut Option<Interval>) {
        match (self.session.is_running(), clock.is_some()) {
            (true, false) => {
                debug!("Starting game clock");
                *clock = Some(time::interval_at(Instant::now() + TICK, TICK));
            }
            (false, true) => {
                debug!("Stopping game clock");
                *clock = None;
            }
            _ => {}
        }
    }

    fn handle(&mut self, command: Command<G>) {
        match command {
            Command::Act(action) => {
                let transition = self.session.apply(action, &mut self.rng);
                self.after(transition);
            }
            Command::Reset => {
                self.session.reset();
                self.completed = false;
                self.notify_update();
            }
            Command::Snapshot(reply) => {
                if reply.send(self.session.clone()).is_err() {
                    warn!("Snapshot requester went away");
                }
            }
            Command::Progress(reply) => {
                if reply.send(self.progress.clone()).is_err() {
                    warn!("Progress requester went away");
                }
            }
        }
    }

    fn after(&mut self, transition: Transition) {
        match transition {
            Transition::Unchanged => {}
            Transition::Updated => self.notify_update(),
            Transition::Finished { won } => {
                self.notify_update();
                self.complete(won);
            }
        }
    }

    fn notify_update(&mut self) {
        let score = self.session.score();
        self.observer.on_update(&self.session, score);
    }

    fn complete(&mut self, won: bool) {
        if self.completed {
            return;
        }
        self.completed = true;

        let final_score = self.session.score();
        if self.progress.record(final_score, won) {
            info!("New best score: {}", final_score);
        }
        info!(
            "Game finished (won: {}) with score {}, {} played",
            won, final_score, self.progress.games_played
        );
        self.observer.on_complete(final_score, won);
    }
}
