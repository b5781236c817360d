//! Gridtoe - timed N×N tic-tac-toe in the terminal.
//!
//! The game rules and the match runner live in [`gridtoe_engine`]; this
//! crate adds configuration, the command line, and the ratatui front end.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
pub mod tui;

pub use cli::Cli;
pub use config::{ConfigError, GameConfig};
pub use tui::{ScreenController, ScreenTransition, Theme, run_tui};
