//! Async match runner.
//!
//! The runner task owns a [`MatchSession`] and is the only thing that
//! mutates it. Commands arrive over a channel, the turn countdown is a
//! single `tokio::time::Interval` re-armed whenever the session's timer
//! generation changes, and every change is published as a
//! [`SessionEvent`]. Serializing through one task means a move and an
//! expiry can never be processed at the same time: whichever is received
//! first wins, and the other finds the round already over.

use crate::error::{BoardError, RunnerError};
use crate::session::{MatchSession, SessionSnapshot};
use crate::turn::Transition;
use crate::types::GameState;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// Wall-clock length of one timer unit.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Commands accepted by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the current player's mark.
    Move(usize),
    /// Forfeit the round for the player on the clock.
    Timeout,
    /// Clear the board, keep scores.
    NewRound,
    /// Clear the board and scores.
    NewMatch,
    /// Start a new match on a board of this size.
    ChangeBoardSize(usize),
    /// Stop the countdown until the next move or reset.
    Pause,
}

/// Messages sent from the runner to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Observable state changed; re-render from the snapshot.
    StateChanged(SessionSnapshot),
    /// The round just ended with this state.
    RoundEnded(GameState),
    /// A command carried a bad index or size.
    CommandRejected(BoardError),
}

/// Cloneable sender side used to drive a running match.
#[derive(Debug, Clone)]
pub struct MatchHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl MatchHandle {
    /// Sends a raw command.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Stopped`] if the runner has exited.
    pub fn send(&self, command: Command) -> Result<(), RunnerError> {
        self.commands.send(command).map_err(|_| RunnerError::Stopped)
    }

    /// Requests a move at `index`.
    pub fn apply_move(&self, index: usize) -> Result<(), RunnerError> {
        self.send(Command::Move(index))
    }

    /// Requests an immediate forfeit for the player on the clock.
    pub fn apply_timeout(&self) -> Result<(), RunnerError> {
        self.send(Command::Timeout)
    }

    /// Requests a new round.
    pub fn new_round(&self) -> Result<(), RunnerError> {
        self.send(Command::NewRound)
    }

    /// Requests a new match.
    pub fn new_match(&self) -> Result<(), RunnerError> {
        self.send(Command::NewMatch)
    }

    /// Requests the countdown be paused.
    pub fn pause(&self) -> Result<(), RunnerError> {
        self.send(Command::Pause)
    }

    /// Requests a new match on a `size`×`size` board.
    pub fn change_board_size(&self, size: usize) -> Result<(), RunnerError> {
        self.send(Command::ChangeBoardSize(size))
    }
}

/// Owns a session and drives its countdown.
#[derive(Debug)]
pub struct MatchRunner {
    session: MatchSession,
    commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<SessionEvent>,
    tick: Duration,
}

impl MatchRunner {
    /// Creates a runner along with its command handle and event stream.
    #[instrument(skip(session), fields(size = session.size()))]
    pub fn new(
        session: MatchSession,
        tick: Duration,
    ) -> (Self, MatchHandle, mpsc::UnboundedReceiver<SessionEvent>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let runner = Self {
            session,
            commands: command_rx,
            events: event_tx,
            tick,
        };
        (runner, MatchHandle { commands: command_tx }, event_rx)
    }

    /// Processes commands and ticks until every [`MatchHandle`] is dropped.
    ///
    /// Returns the session in its final state.
    #[instrument(
        skip(self),
        fields(size = self.session.size(), tick_ms = self.tick.as_millis() as u64)
    )]
    pub async fn run(mut self) -> MatchSession {
        info!("Match runner started");
        self.publish_state();

        let mut interval = self.countdown();
        let mut armed = self.session.timer_generation();

        loop {
            let running = self.session.timer_running();
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    self.handle(command);
                }
                _ = interval.tick(), if running => {
                    let transition = self.session.tick(armed);
                    self.publish(transition);
                }
            }

            let generation = self.session.timer_generation();
            if generation != armed {
                armed = generation;
                interval.reset();
                debug!(?generation, "Countdown re-armed");
            }
        }

        info!("Match runner stopped");
        self.session
    }

    fn countdown(&self) -> Interval {
        let mut interval = time::interval_at(Instant::now() + self.tick, self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    #[instrument(skip(self))]
    fn handle(&mut self, command: Command) {
        match command {
            Command::Move(index) => match self.session.apply_move(index) {
                Ok(transition) => self.publish(transition),
                Err(e) => self.reject(e),
            },
            Command::Timeout => {
                let transition = self.session.apply_timeout();
                self.publish(transition);
            }
            Command::NewRound => {
                self.session.new_round();
                self.publish_state();
            }
            Command::NewMatch => {
                self.session.new_match();
                self.publish_state();
            }
            Command::ChangeBoardSize(size) => match self.session.change_board_size(size) {
                Ok(()) => self.publish_state(),
                Err(e) => self.reject(e),
            },
            Command::Pause => {
                self.session.pause();
                self.publish_state();
            }
        }
    }

    fn publish(&self, transition: Transition) {
        if !transition.changed() {
            return;
        }
        self.publish_state();
        if let Transition::RoundEnded(state) = transition {
            self.emit(SessionEvent::RoundEnded(state));
        }
    }

    fn publish_state(&self) {
        self.emit(SessionEvent::StateChanged(self.session.snapshot()));
    }

    fn reject(&self, error: BoardError) {
        warn!(error = %error, "Command rejected");
        self.emit(SessionEvent::CommandRejected(error));
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("Event receiver dropped");
        }
    }
}
