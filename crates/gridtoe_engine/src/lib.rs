//! Grid tic-tac-toe engine.
//!
//! Pure game logic for two players on an N×N board: win and draw
//! detection over every row, column, and both diagonals, turn alternation
//! with a per-turn countdown that forfeits the round on expiry, and win
//! counters that survive round resets.
//!
//! # Architecture
//!
//! - **Board**: fixed-size grid of [`CellState`] values
//! - **Rules**: [`evaluate`] derives the [`GameState`] from a board
//! - **Turn controller**: [`TurnController`] applies moves and timeouts
//! - **Session**: [`MatchSession`] adds rounds, resets, and scores
//! - **Runner**: [`MatchRunner`] serializes commands and drives the countdown
//!
//! # Example
//!
//! ```
//! use gridtoe_engine::{GameState, MatchSession, Player};
//!
//! let mut session = MatchSession::new(3)?;
//! for index in [0, 1, 3, 4, 6] {
//!     session.apply_move(index)?;
//! }
//! assert_eq!(session.state(), GameState::CrossWin);
//! assert_eq!(session.wins(Player::Cross), 1);
//! # Ok::<(), gridtoe_engine::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod rules;
mod runner;
mod score;
mod session;
mod timer;
mod turn;
mod types;

pub use error::{BoardError, RunnerError};
pub use rules::{check_winner, evaluate, is_draw, line_count, winning_lines};
pub use runner::{Command, DEFAULT_TICK, MatchHandle, MatchRunner, SessionEvent};
pub use score::Scoreboard;
pub use session::{MatchSession, SessionSnapshot};
pub use timer::{DEFAULT_TURN_UNITS, TimerGeneration, TimerTick, TurnTimer};
pub use turn::{Transition, TurnController};
pub use types::{Board, CellState, GameState, Player};
